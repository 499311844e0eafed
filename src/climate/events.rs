use bevy::prelude::*;

/// A tree just reached Mature or Snag and should pick up the current wind
#[derive(Message)]
pub struct TreeGrownMessage {
    pub tree: Entity,
}
