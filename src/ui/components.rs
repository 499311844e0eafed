use crate::climate::bridge::ReadoutKind;
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadoutField {
    /// Main panel value
    Panel,
    /// Label shown next to the marker
    Target,
}

#[derive(Component)]
pub struct ReadoutText {
    pub kind: ReadoutKind,
    pub field: ReadoutField,
}
