//! Headless map simulation.
//!
//! This binary:
//! 1. Loads one map (from `MAP_CONFIG` if set)
//! 2. Scatters characters, monsters and items over it
//! 3. Runs the tick loop: commit positions, wander, update zones, query
//!
//! Knobs (environment):
//! - `MAP_CONFIG` - path to a JSON map config
//! - `TICKS`, `CHARACTERS`, `MONSTERS`, `ITEMS` - workload size
//! - `SEED` - RNG seed
//! - `TARGET_FPS` - tick rate, 0 runs flat out

use std::path::PathBuf;
use std::str::FromStr;
use std::time::{Duration, Instant};

use eyre::WrapErr;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use realm_map::{MapComposite, MapConfig, MapError, MapManager};
use realm_thing::{MapId, Point, Thing, ThingArena, ThingId, ThingKind};
use tracing::{debug, info, warn};

/// Largest step per tick, well below one zone.
const MAX_STEP: i32 = 48;
/// How far characters see.
const VIEW_RADIUS: u32 = 320;
/// Chance per tick that a monster dies and another spawns elsewhere.
const RESPAWN_CHANCE: f64 = 0.05;

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn load_config() -> eyre::Result<MapConfig> {
    match std::env::var("MAP_CONFIG").map(PathBuf::from) {
        Ok(path) => {
            let json = std::fs::read_to_string(&path)
                .wrap_err_with(|| format!("reading {}", path.display()))?;
            Ok(MapConfig::from_json(&json)?)
        }
        Err(_) => Ok(MapConfig::from_tiles(200, 200)),
    }
}

fn random_point(rng: &mut StdRng, config: &MapConfig) -> Point {
    Point::new(
        rng.gen_range(0..config.width) as i32,
        rng.gen_range(0..config.height) as i32,
    )
}

/// Spawn a thing and put it on the map. Exhaustion is logged and the
/// thing despawned; the simulation keeps going.
fn spawn(
    things: &mut ThingArena,
    map: &mut MapComposite,
    kind: ThingKind,
    position: Point,
) -> eyre::Result<Option<ThingId>> {
    let id = things.spawn(Thing::new(kind, position));
    match map.insert(things, id) {
        Ok(_) => Ok(Some(id)),
        Err(MapError::IdsExhausted { map }) => {
            warn!("{map} is full, dropping {kind:?} at {position}");
            things.despawn(id);
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("realm_sim=info".parse()?)
                .add_directive("realm_map=info".parse()?),
        )
        .init();

    let config = load_config()?;
    let ticks: u64 = env_or("TICKS", 200);
    let characters: u32 = env_or("CHARACTERS", 50);
    let monsters: u32 = env_or("MONSTERS", 500);
    let items: u32 = env_or("ITEMS", 200);
    let target_fps: f32 = env_or("TARGET_FPS", 0.0);
    let mut rng = StdRng::seed_from_u64(env_or("SEED", 42));

    info!(
        "Map {}x{} px, zones of {} px; {characters} characters, {monsters} monsters, {items} items",
        config.width, config.height, config.zone_size
    );

    let mut things = ThingArena::new();
    let mut maps = MapManager::new();
    let map_id = MapId(1);
    let map = maps.load(map_id, "wilderness", &config)?;

    let mut movers = Vec::new();
    for (kind, count) in [
        (ThingKind::Character, characters),
        (ThingKind::Monster, monsters),
        (ThingKind::Fixed, items),
    ] {
        for _ in 0..count {
            let position = random_point(&mut rng, &config);
            if let Some(id) = spawn(&mut things, map, kind, position)? {
                if kind.is_movable() {
                    movers.push(id);
                }
            }
        }
    }
    info!("Spawned {} things", map.len());

    let target_delta = (target_fps > 0.0).then(|| Duration::from_secs_f32(1.0 / target_fps));
    let (max_x, max_y) = (config.width as i32 - 1, config.height as i32 - 1);
    let mut total_crossings = 0;

    for tick in 1..=ticks {
        let start = Instant::now();

        // Start of tick
        for &id in &movers {
            if let Some(thing) = things.get_mut(id) {
                thing.commit_position();
            }
        }

        // Monsters die and respawn elsewhere, recycling their public IDs
        let map = maps
            .get_mut(map_id)
            .ok_or(MapError::MapNotLoaded(map_id))?;
        if rng.gen_bool(RESPAWN_CHANCE) {
            let victim = movers.iter().position(|&id| {
                things
                    .get(id)
                    .is_some_and(|t| t.kind() == ThingKind::Monster)
            });
            if let Some(at) = victim {
                let id = movers.swap_remove(at);
                map.remove(&mut things, id)?;
                things.despawn(id);

                let position = random_point(&mut rng, &config);
                if let Some(id) = spawn(&mut things, map, ThingKind::Monster, position)? {
                    movers.push(id);
                }
            }
        }

        // Wander
        for &id in &movers {
            let Some(thing) = things.get_mut(id) else { continue };
            let p = thing.position();
            thing.set_position(Point::new(
                (p.x + rng.gen_range(-MAX_STEP..=MAX_STEP)).clamp(0, max_x),
                (p.y + rng.gen_range(-MAX_STEP..=MAX_STEP)).clamp(0, max_y),
            ));
        }

        let crossings = maps.update_all(&things);
        total_crossings += crossings;

        // Visibility: what each character may have newly seen this tick
        let map = maps.get(map_id).ok_or(MapError::MapNotLoaded(map_id))?;
        let mut sightings = 0;
        for &id in &movers {
            let Some(thing) = things.get(id) else { continue };
            if thing.kind() == ThingKind::Character {
                sightings += map.around_moving(thing, VIEW_RADIUS).moving().count();
            }
        }

        debug!("tick {tick}: {crossings} crossings, {sightings} sightings");
        if tick.is_multiple_of(20) {
            info!(
                "tick {tick}: {} things, {} public ids in {} buckets, {total_crossings} crossings so far, {sightings} sightings",
                map.len(),
                map.content().ids().allocated(),
                map.content().ids().bucket_count(),
            );
        }

        if let Some(target) = target_delta {
            let elapsed = start.elapsed();
            if elapsed < target {
                std::thread::sleep(target - elapsed);
            }
        }
    }

    let map = maps.unload(map_id, &mut things)?;
    info!("Unloaded {} after {ticks} ticks", map.name());
    Ok(())
}
