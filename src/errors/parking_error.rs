use thiserror::Error;

/// Failures reported by the parking lot itself. Display is the user-facing output.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParkingError {
    #[error("Parking full!")]
    Full,
    #[error("Cannot leave an empty spot: {0}")]
    NotOccupied(usize),
    #[error("Registration {0} not found in parking spaces.")]
    PlateNotFound(String),
    #[error("Parking lot not created yet. Use create_parking_lot first.")]
    NotCreated,
    #[error("Cannot create a parking lot with {0} spaces.")]
    TooLarge(usize),
}
