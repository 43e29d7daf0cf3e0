use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use ahash::AHashMap;
use log::{debug, info, warn};
use serde::Serialize;

use crate::errors::parking_error::ParkingError;

/// A vehicle checked into the lot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Occupant {
    pub plate: String,
    pub color: String,
}

impl Occupant {
    pub fn new(plate: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            plate: plate.into(),
            color: color.into(),
        }
    }
}

/// One row of `status`. `slot` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Allocation {
    pub slot: usize,
    pub plate: String,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    Plates,
    Slots,
}

/// Result of a color query, in ascending slot order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ColorMatches {
    Plates(Vec<String>),
    Slots(Vec<usize>),
}

impl ColorMatches {
    pub fn is_empty(&self) -> bool {
        match self {
            ColorMatches::Plates(plates) => plates.is_empty(),
            ColorMatches::Slots(slots) => slots.is_empty(),
        }
    }
}

/// Everything the command loop needs from a lot. Slot numbers crossing this boundary are 1-based.
#[cfg_attr(test, mockall::automock)]
pub trait ParkingInteractions {
    fn create_parking_lot(&mut self, slots: usize) -> Result<(), ParkingError>;
    fn park(&mut self, occupant: Occupant) -> Result<usize, ParkingError>;
    fn leave(&mut self, slot: usize) -> Result<(), ParkingError>;
    fn status(&self) -> Vec<Allocation>;
    fn find_by_color(&self, color: &str, projection: Projection) -> ColorMatches;
    fn slot_for_plate(&self, plate: &str) -> Result<usize, ParkingError>;
}

/// Fixed-capacity lot with first-fit assignment.
///
/// `allocations` is the source of truth, keyed by 0-based index; `spaces[i]` is true exactly
/// when `allocations` holds `i`.
#[derive(Debug, Default)]
pub struct ParkingLot {
    spaces: Vec<bool>,
    allocations: AHashMap<usize, Occupant>,
    created: bool,
}

impl ParkingLot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slots(slots: usize) -> Result<Self, ParkingError> {
        let mut lot = Self::new();
        lot.create_parking_lot(slots)?;
        Ok(lot)
    }

    /// `None` until `create_parking_lot` has been called.
    pub fn capacity(&self) -> Option<usize> {
        self.created.then_some(self.spaces.len())
    }

    pub fn occupied(&self) -> usize {
        self.allocations.len()
    }

    fn first_free(&self) -> Option<usize> {
        self.spaces.iter().position(|taken| !taken)
    }

    // (1-based slot, occupant) in ascending slot order.
    fn occupants(&self) -> impl Iterator<Item = (usize, &Occupant)> + '_ {
        self.spaces
            .iter()
            .enumerate()
            .filter(|(_, taken)| **taken)
            .filter_map(move |(idx, _)| {
                self.allocations.get(&idx).map(|occupant| (idx + 1, occupant))
            })
    }
}

impl ParkingInteractions for ParkingLot {
    /// On failure the previous lot, if any, is left untouched.
    fn create_parking_lot(&mut self, slots: usize) -> Result<(), ParkingError> {
        let mut spaces = Vec::new();
        if let Err(e) = spaces.try_reserve_exact(slots) {
            warn!("cannot allocate {slots} slots: {e}");
            return Err(ParkingError::TooLarge(slots));
        }
        spaces.resize(slots, false);

        if self.created && !self.allocations.is_empty() {
            info!("re-creating lot, dropping {} active allocations", self.allocations.len());
        }
        self.spaces = spaces;
        self.allocations.clear();
        self.created = true;
        debug!("lot created with {slots} slots");
        Ok(())
    }

    fn park(&mut self, occupant: Occupant) -> Result<usize, ParkingError> {
        if !self.created {
            return Err(ParkingError::NotCreated);
        }
        let idx = self.first_free().ok_or(ParkingError::Full)?;
        debug_assert!(!self.allocations.contains_key(&idx), "slot {idx} marked free but allocated");
        debug!("allotting slot {} to {} ({})", idx + 1, occupant.plate, occupant.color);
        self.spaces[idx] = true;
        self.allocations.insert(idx, occupant);
        Ok(idx + 1)
    }

    fn leave(&mut self, slot: usize) -> Result<(), ParkingError> {
        let removed = slot
            .checked_sub(1)
            .and_then(|idx| self.allocations.remove(&idx).map(|occupant| (idx, occupant)));
        match removed {
            Some((idx, occupant)) => {
                self.spaces[idx] = false;
                debug!("slot {slot} freed by {}", occupant.plate);
                Ok(())
            }
            None => Err(ParkingError::NotOccupied(slot)),
        }
    }

    fn status(&self) -> Vec<Allocation> {
        self.occupants()
            .map(|(slot, occupant)| Allocation {
                slot,
                plate: occupant.plate.clone(),
                color: occupant.color.clone(),
            })
            .collect()
    }

    fn find_by_color(&self, color: &str, projection: Projection) -> ColorMatches {
        let matching = self.occupants().filter(|(_, occupant)| occupant.color == color);
        match projection {
            Projection::Plates => {
                ColorMatches::Plates(matching.map(|(_, occupant)| occupant.plate.clone()).collect())
            }
            Projection::Slots => ColorMatches::Slots(matching.map(|(slot, _)| slot).collect()),
        }
    }

    fn slot_for_plate(&self, plate: &str) -> Result<usize, ParkingError> {
        self.occupants()
            .find(|(_, occupant)| occupant.plate == plate)
            .map(|(slot, _)| slot)
            .ok_or_else(|| ParkingError::PlateNotFound(plate.to_string()))
    }
}

/// Cloneable handle to a lot shared between threads. Each call holds the lock for its whole
/// read-then-write, so two concurrent `park`s never see the same free slot.
#[derive(Debug, Clone, Default)]
pub struct SharedParkingLot {
    inner: Arc<Mutex<ParkingLot>>,
}

impl SharedParkingLot {
    pub fn new(lot: ParkingLot) -> Self {
        Self {
            inner: Arc::new(Mutex::new(lot)),
        }
    }

    // A panic mid-call can't leave the lot half-updated, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, ParkingLot> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ParkingInteractions for SharedParkingLot {
    fn create_parking_lot(&mut self, slots: usize) -> Result<(), ParkingError> {
        self.lock().create_parking_lot(slots)
    }

    fn park(&mut self, occupant: Occupant) -> Result<usize, ParkingError> {
        self.lock().park(occupant)
    }

    fn leave(&mut self, slot: usize) -> Result<(), ParkingError> {
        self.lock().leave(slot)
    }

    fn status(&self) -> Vec<Allocation> {
        self.lock().status()
    }

    fn find_by_color(&self, color: &str, projection: Projection) -> ColorMatches {
        self.lock().find_by_color(color, projection)
    }

    fn slot_for_plate(&self, plate: &str) -> Result<usize, ParkingError> {
        self.lock().slot_for_plate(plate)
    }
}
