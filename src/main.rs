mod content;
mod core;
#[cfg(feature = "dev-tools")]
mod debug;
mod map;
mod movement;
mod scene;
mod sprites;

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::content::{CONFIG_PATH, ContentPlugin};
use crate::scene::SceneFrame;

fn main() {
    // Read before the app is built: the window is sized from it.
    let content = ContentPlugin::load(CONFIG_PATH);
    let window = content.config.window.clone();

    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: window.title,
                    resolution: (window.width, window.height).into(),
                    resizable: false,
                    ..default()
                }),
                ..default()
            })
            .set(ImagePlugin::default_nearest()),
    )
    .add_plugins(PhysicsPlugins::default())
    .insert_resource(ClearColor(Color::BLACK))
    .insert_resource(Gravity(Vec2::ZERO))
    .insert_resource(SceneFrame::new(window.width as f32, window.height as f32))
    .add_plugins((
        content,
        core::CorePlugin,
        movement::MovementPlugin,
        sprites::SpritesPlugin,
        scene::ScenePlugin,
    ));

    #[cfg(feature = "dev-tools")]
    app.add_plugins(debug::DebugPlugin);

    app.run();
}
