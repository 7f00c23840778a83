use std::time::Instant;
use tetherbox::{SandboxWorld, GRAVITY_Y};

use rapier2d::prelude::{nalgebra, vector};

const DEFAULT_STEPS: usize = 240;
const PRINT_INTERVAL: usize = 30;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let steps = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<usize>().ok())
        .unwrap_or(DEFAULT_STEPS);

    println!("Running headless sandbox simulation for {steps} steps...");

    let start_time = Instant::now();
    let mut world = SandboxWorld::new(vector![0.0, GRAVITY_Y]);
    for step in 0..steps {
        world.step();

        if step % PRINT_INTERVAL == 0 || step == steps - 1 {
            if let Some(ball) = world.body_snapshot(world.ball()) {
                println!(
                    "step {:>4}: ball=({:+.2}, {:+.2}) vel=({:+.2}, {:+.2})",
                    step + 1,
                    ball.position[0],
                    ball.position[1],
                    ball.velocity[0],
                    ball.velocity[1],
                );
            }
        }
    }

    let elapsed = start_time.elapsed();
    println!(
        "Simulated {:.2}s of world time in {:.2?}",
        world.time(),
        elapsed,
    );
}
