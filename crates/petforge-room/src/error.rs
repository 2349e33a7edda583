//! Error types for the room layer.

/// Errors that can occur during room navigation.
///
/// Note how small this is: invalid game actions are not errors (they are
/// dropped no-ops), and forced navigation is not an error (the request
/// succeeds, just somewhere else). The only failure a caller can see is
/// asking to move while the pet sleeps.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// Navigation was rejected because the pet is sleeping. The caller
    /// surfaces the "character is sleeping" notice and leaves the room
    /// unchanged.
    #[error("the character is sleeping; let them rest to regain energy")]
    PetSleeping,
}
