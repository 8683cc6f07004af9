//! Player domain: spawning and the game mode
//!
//! - spawn: default character / controller from config
//! - game_mode: login → spawn → possess

pub mod game_mode;
pub mod spawn;

pub use game_mode::*;
pub use spawn::*;

use bevy::prelude::*;

use crate::GameplaySet;

pub struct GameModePlugin;

impl Plugin for GameModePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameMode>()
            .add_event::<PlayerLogin>()
            .add_event::<PlayerSpawned>()
            .add_systems(Update, handle_player_logins.in_set(GameplaySet::Spawn));
    }
}
