use clap::{Parser, Subcommand};
use raylib::prelude::*;
use tracing::{info, instrument};

use physbox::{
    body::{Ball, Square, DRIVE_ACCEL},
    pick::DragState,
    ragdoll::{self, Ragdoll},
    spring::Spring,
};

#[derive(Parser)]
#[command(name = "physbox")]
#[command(about = "Five small 2D physics sketches")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ball bouncing off the window edges.
    Bounce,
    /// Two falling balls joined by a length-limited spring.
    Spring,
    /// Spring anchored to a fixed ball; drag the free one.
    Anchored,
    /// Drive a square around with arrow-key forces.
    Force,
    /// Rigid-body ragdoll dropped onto the ground.
    Ragdoll,
}

const WINDOW_WIDTH: i32 = 800;
const WINDOW_HEIGHT: i32 = 600;
const TARGET_FPS: u32 = 60;

/// Height of the green ground strip used by the spring sketches.
const GROUND_Y: f32 = 580.0;

const SPRING_THICKNESS: f32 = 5.0;

#[instrument]
fn run_bounce() {
    let (mut rl, thread) = raylib::init()
        .size(WINDOW_WIDTH, WINDOW_HEIGHT)
        .title("Bouncing Ball Simulation")
        .build();
    rl.set_target_fps(TARGET_FPS);

    let bounds = Vector2::new(WINDOW_WIDTH as f32, WINDOW_HEIGHT as f32);
    let mut ball = Ball::new(Vector2::new(50.0, 50.0), 20.0);
    ball.velocity = Vector2::new(100.0, 100.0);

    info!("starting bounce sketch");
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();
        ball.step_bounce(dt, bounds);

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);
        d.draw_circle_v(ball.position, ball.radius, Color::RED);
        d.draw_fps(10, 10);
    }
}

#[instrument]
fn run_spring(pin_first: bool, max_length: f32) {
    let (mut rl, thread) = raylib::init()
        .size(WINDOW_WIDTH, WINDOW_HEIGHT)
        .title("Balls and Spring Simulation")
        .build();
    rl.set_target_fps(TARGET_FPS);

    let mut balls = [
        Ball::new(Vector2::new(300.0, 300.0), 20.0),
        Ball::new(Vector2::new(500.0, 300.0), 20.0),
    ];
    balls[0].pinned = pin_first;
    let spring = Spring::new(max_length);
    let mut drag = DragState::new();

    info!(pin_first, max_length, "starting spring sketch");
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();
        let mouse = rl.get_mouse_position();

        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            drag.grab(mouse, &balls);
        }
        if rl.is_mouse_button_released(MouseButton::MOUSE_BUTTON_LEFT) {
            drag.release();
        }
        drag.apply(mouse, &mut balls);

        for (index, ball) in balls.iter_mut().enumerate() {
            if drag.grabbed() != Some(index) {
                ball.step_fall(dt, GROUND_Y);
            }
        }
        let [first, second] = &mut balls;
        spring.constrain(first, second);

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);

        let geom = Spring::geometry(&balls[0], &balls[1]);
        d.draw_rectangle_pro(
            Rectangle::new(geom.origin.x, geom.origin.y, geom.length, SPRING_THICKNESS),
            Vector2::new(0.0, SPRING_THICKNESS * 0.5),
            geom.angle_deg,
            Color::BLUE,
        );
        for ball in &balls {
            d.draw_circle_v(ball.position, ball.radius, Color::RED);
        }
        d.draw_rectangle_v(
            Vector2::new(0.0, GROUND_Y),
            Vector2::new(WINDOW_WIDTH as f32, 20.0),
            Color::GREEN,
        );
        d.draw_fps(10, 10);
    }
}

#[instrument]
fn run_force() {
    let (mut rl, thread) = raylib::init()
        .size(WINDOW_WIDTH, WINDOW_HEIGHT)
        .title("Move Square with Forces")
        .build();
    rl.set_target_fps(TARGET_FPS);

    let mut square = Square::new(Vector2::new(375.0, 275.0), 50.0);

    info!("starting force sketch");
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();

        let mut force = Vector2::zero();
        if rl.is_key_down(KeyboardKey::KEY_LEFT) {
            force.x -= DRIVE_ACCEL;
        }
        if rl.is_key_down(KeyboardKey::KEY_RIGHT) {
            force.x += DRIVE_ACCEL;
        }
        if rl.is_key_down(KeyboardKey::KEY_UP) {
            force.y -= DRIVE_ACCEL;
        }
        if rl.is_key_down(KeyboardKey::KEY_DOWN) {
            force.y += DRIVE_ACCEL;
        }

        square.apply_force(force, dt);
        square.damp();

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);
        d.draw_rectangle_v(
            square.position,
            Vector2::new(square.size, square.size),
            Color::BLUE,
        );
        d.draw_fps(10, 10);
    }
}

#[instrument]
fn run_ragdoll() {
    let (mut rl, thread) = raylib::init()
        .size(WINDOW_WIDTH, WINDOW_HEIGHT)
        .title("Ragdoll Simulation")
        .build();
    rl.set_target_fps(TARGET_FPS);

    let mut world = ragdoll::World::new(Vector2::new(0.0, 9.8));
    let ground_size = Vector2::new(WINDOW_WIDTH as f32, 40.0);
    let ground_center = Vector2::new(WINDOW_WIDTH as f32 * 0.5, 590.0);
    world.add_box(ground_center, ground_size, false, 1.0, 0.3);
    let doll = Ragdoll::spawn(&mut world, Vector2::new(400.0, 100.0));
    let mut paused = false;

    info!("starting ragdoll sketch");
    while !rl.window_should_close() {
        if rl.is_key_pressed(KeyboardKey::KEY_SPACE) {
            paused = !paused;
        }
        if !paused {
            world.step();
        }

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::WHITE);

        d.draw_rectangle_pro(
            Rectangle::new(ground_center.x, ground_center.y, ground_size.x, ground_size.y),
            Vector2::new(ground_size.x * 0.5, ground_size.y * 0.5),
            0.0,
            Color::GREEN,
        );

        for (handle, size) in doll.limbs() {
            let (center, angle) = world.pose(handle);
            d.draw_rectangle_pro(
                Rectangle::new(center.x, center.y, size.x, size.y),
                Vector2::new(size.x * 0.5, size.y * 0.5),
                angle,
                Color::RED,
            );
        }
        let (head_center, _) = world.pose(doll.head);
        d.draw_circle_v(head_center, ragdoll::HEAD_RADIUS, Color::BLUE);

        if paused {
            d.draw_text("PAUSED", 10, 30, 18, Color::RED);
        }
        d.draw_fps(10, 10);
    }
}

fn main() {
    // Initialize tracing subscriber for structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Bounce => run_bounce(),
        Commands::Spring => run_spring(false, 300.0),
        Commands::Anchored => run_spring(true, 200.0),
        Commands::Force => run_force(),
        Commands::Ragdoll => run_ragdoll(),
    }
}
