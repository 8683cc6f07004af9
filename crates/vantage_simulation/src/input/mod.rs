//! Player input module
//!
//! Turns abstract input actions into gameplay calls on the possessed
//! character.
//!
//! # Architecture
//!
//! ```text
//! host devices (client crate) / scripted session (headless)
//!     ↓
//! InputActionEvent (ECS event) - events.rs
//!     ↓
//! InputBindings (resource) - bindings.rs
//!     ↓
//! route_player_input (ECS system) - systems.rs
//! ```

pub mod bindings;
pub mod events;
pub mod systems;

#[cfg(test)]
mod input_tests;

pub use bindings::*;
pub use events::*;
pub use systems::*;

use bevy::prelude::*;

use crate::GameplaySet;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<InputActionEvent>()
            .init_resource::<InputBindings>()
            .add_systems(Update, route_player_input.in_set(GameplaySet::Input));
    }
}
