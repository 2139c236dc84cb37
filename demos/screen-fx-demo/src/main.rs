use glam::Vec2;
use sprite_fx::*;

const WORLD_W: f32 = 800.0;
const WORLD_H: f32 = 600.0;
const FRAME: f32 = 1.0 / 60.0;
const MAX_FRAMES: usize = 600;

/// Scene layout used by the screen effects: a pivot centered in the scene
/// for zoom and tumble, and a world layer under it for shake.
struct Demo {
    scene: Scene,
    runner: ActionRunner,
    pivot: NodeId,
    world: NodeId,
    ball: NodeId,
    background: Color,
}

impl Demo {
    fn new() -> Result<Self> {
        let background = Color::from_rgb(8, 57, 71);
        let mut scene = Scene::new().with_background(background);
        let pivot = scene.spawn(
            scene.root(),
            Node::new()
                .with_name("world pivot")
                .with_position(Vec2::new(WORLD_W / 2.0, WORLD_H / 2.0)),
        )?;
        let world = scene.spawn(
            pivot,
            Node::new()
                .with_name("world")
                .with_position(Vec2::new(-WORLD_W / 2.0, -WORLD_H / 2.0)),
        )?;
        let ball = scene.spawn(
            world,
            Node::new().with_name("ball").with_position(Vec2::new(100.0, WORLD_H)),
        )?;
        Ok(Self {
            scene,
            runner: ActionRunner::new(),
            pivot,
            world,
            ball,
            background,
        })
    }

    /// Drop the ball onto the floor, then hit the screen with everything at once.
    fn start(&mut self, config: &FxConfig) -> Result<()> {
        let floor = Vec2::new(100.0, 80.0);
        let drop = Action::move_effect(
            self.ball,
            1.0,
            Vec2::new(100.0, WORLD_H),
            floor,
            Easing::BounceOut.shared(),
        )?;
        self.runner.add(self.ball, Action::sequence(vec![
            drop,
            Action::jump_to_height(60.0, 0.5, floor)?,
        ]));

        let impact = config.shake(&self.scene, self.world, Vec2::new(12.0, 4.0))?;
        self.runner.add(self.world, Action::after_delay(1.0, impact));

        let zoom = config.zoom(&self.scene, self.pivot)?;
        let tumble = config.tumble(&self.scene, self.pivot, 4.0_f32.to_radians())?;
        self.runner
            .add(self.pivot, Action::after_delay(1.0, Action::group(vec![zoom, tumble])));

        let root = self.scene.root();
        let glitch = config.glitch(&self.scene, self.background)?;
        self.runner.add(root, Action::after_delay(1.0, glitch));
        Ok(())
    }

    fn report(&self, frame: usize) {
        let (Some(world), Some(pivot), Some(ball)) = (
            self.scene.get(self.world),
            self.scene.get(self.pivot),
            self.scene.get(self.ball),
        ) else {
            return;
        };
        log::info!(
            "frame {frame:>3}: world {:?} pivot scale {:?} rot {:.4} ball {:?} bg {:?}",
            world.position,
            pivot.scale,
            pivot.rotation,
            ball.position,
            self.scene.background().to_array(),
        );
    }

    fn run(&mut self) {
        for frame in 0..MAX_FRAMES {
            if self.runner.is_empty() {
                log::info!("all effects settled after {frame} frames");
                return;
            }
            self.runner.tick(FRAME, &mut self.scene);
            if frame % 10 == 0 {
                self.report(frame);
            }
        }
        log::warn!("{} actions still running after {MAX_FRAMES} frames", self.runner.len());
    }
}

fn load_config() -> FxConfig {
    let Some(path) = std::env::args().nth(1) else {
        return FxConfig::default();
    };
    let loaded = std::fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|json| FxConfig::from_json(&json).map_err(|e| e.to_string()));
    match loaded {
        Ok(config) => config,
        Err(e) => {
            log::error!("could not load {path}: {e}; using defaults");
            FxConfig::default()
        }
    }
}

fn main() {
    env_logger::init();

    let mut config = load_config();
    // Keep the demo run short.
    config.shake_duration = config.shake_duration.min(1.5);
    if let Err(e) = config.validate() {
        log::error!("invalid config: {e}");
        return;
    }

    let setup = Demo::new().and_then(|mut demo| demo.start(&config).map(|_| demo));
    match setup {
        Ok(mut demo) => {
            log::info!("running {} actions at {FRAME:.4}s per frame", demo.runner.len());
            demo.run();
        }
        Err(e) => log::error!("demo setup failed: {e}"),
    }
}
