//! Action bindings: (action, phase) → gameplay command

use std::collections::HashMap;

use bevy::prelude::*;

use super::events::{ActionId, TriggerPhase};

/// What the router does for a bound (action, phase)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    Move,
    /// Stick released: clear last movement input
    StopMove,
    Look,
    Jump,
    StopJumping,
    StartFire,
    StopFire,
    ToggleView,
}

/// Binding table; pairs not in the table are ignored
#[derive(Resource, Debug, Clone)]
pub struct InputBindings {
    table: HashMap<(ActionId, TriggerPhase), InputCommand>,
}

impl Default for InputBindings {
    fn default() -> Self {
        use ActionId::*;
        use TriggerPhase::*;

        Self::empty()
            .bind(Move, Triggered, InputCommand::Move)
            .bind(Move, Completed, InputCommand::StopMove)
            .bind(Look, Triggered, InputCommand::Look)
            .bind(Jump, Started, InputCommand::Jump)
            .bind(Jump, Completed, InputCommand::StopJumping)
            .bind(Fire, Started, InputCommand::StartFire)
            .bind(Fire, Completed, InputCommand::StopFire)
            .bind(ToggleView, Started, InputCommand::ToggleView)
    }
}

impl InputBindings {
    pub fn empty() -> Self {
        Self { table: HashMap::new() }
    }

    pub fn bind(mut self, action: ActionId, phase: TriggerPhase, command: InputCommand) -> Self {
        self.table.insert((action, phase), command);
        self
    }

    pub fn unbind(&mut self, action: ActionId, phase: TriggerPhase) {
        self.table.remove(&(action, phase));
    }

    pub fn resolve(&self, action: ActionId, phase: TriggerPhase) -> Option<InputCommand> {
        self.table.get(&(action, phase)).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let bindings = InputBindings::default();

        assert_eq!(bindings.resolve(ActionId::Move, TriggerPhase::Triggered), Some(InputCommand::Move));
        assert_eq!(bindings.resolve(ActionId::Move, TriggerPhase::Completed), Some(InputCommand::StopMove));
        assert_eq!(bindings.resolve(ActionId::Jump, TriggerPhase::Started), Some(InputCommand::Jump));
        assert_eq!(bindings.resolve(ActionId::Fire, TriggerPhase::Completed), Some(InputCommand::StopFire));
        assert_eq!(
            bindings.resolve(ActionId::ToggleView, TriggerPhase::Started),
            Some(InputCommand::ToggleView)
        );
    }

    #[test]
    fn test_unbound_pairs_resolve_to_none() {
        let bindings = InputBindings::default();

        assert_eq!(bindings.resolve(ActionId::ToggleView, TriggerPhase::Completed), None);
        assert_eq!(bindings.resolve(ActionId::Look, TriggerPhase::Started), None);
        assert_eq!(bindings.resolve(ActionId::Jump, TriggerPhase::Triggered), None);
    }

    #[test]
    fn test_unbind() {
        let mut bindings = InputBindings::default();
        bindings.unbind(ActionId::Fire, TriggerPhase::Started);
        assert_eq!(bindings.resolve(ActionId::Fire, TriggerPhase::Started), None);
    }
}
