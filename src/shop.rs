//! Face shop and persistent player profile
//!
//! The profile is the only state that survives a reload: gem balance,
//! unlocked faces and the equipped face. Each value lives under its own
//! storage key and is written back as soon as it changes.

use thiserror::Error;

use crate::consts::*;
use crate::platform::{KeyValueStore, StorageError};

#[derive(Debug, Error)]
pub enum ShopError {
    #[error("no shop item at index {0}")]
    UnknownItem(usize),
    #[error("item {0} is already unlocked")]
    AlreadyOwned(usize),
    #[error("item {0} is locked")]
    Locked(usize),
    #[error("not enough gems: price {price}, balance {balance}")]
    InsufficientGems { price: u32, balance: u32 },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// What the shop offers for an item given the current profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopAction {
    Buy,
    Equip,
    Equipped,
}

impl ShopAction {
    pub fn label(&self) -> &'static str {
        match self {
            ShopAction::Buy => "BUY",
            ShopAction::Equip => "EQUIP",
            ShopAction::Equipped => "EQUIPPED",
        }
    }
}

/// One row of the shop panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShopEntry {
    /// Zero-based slot
    pub index: usize,
    pub price: u32,
    pub action: ShopAction,
}

/// Persistent player profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Gem balance
    pub gems: u32,
    /// Unlock flag per face slot
    pub unlocked: [bool; SKIN_COUNT],
    /// Equipped face (one-based, 1..=SKIN_COUNT)
    pub face: u8,
}

impl Default for Profile {
    fn default() -> Self {
        let mut unlocked = [false; SKIN_COUNT];
        unlocked[FREE_SKIN_INDEX] = true;
        Self {
            gems: 0,
            unlocked,
            face: DEFAULT_FACE,
        }
    }
}

impl Profile {
    /// Read the profile from storage, falling back to defaults per key
    pub fn load(store: &impl KeyValueStore) -> Self {
        let defaults = Self::default();

        let gems = store
            .get(GEMS_KEY)
            .and_then(|s| s.trim().parse::<u32>().ok())
            .unwrap_or(defaults.gems);

        let face = match store.get(FACE_KEY).map(|s| s.trim().parse::<u8>()) {
            Some(Ok(face)) if (1..=SKIN_COUNT as u8).contains(&face) => face,
            Some(_) => {
                log::warn!("Ignoring malformed equipped face, using {}", DEFAULT_FACE);
                defaults.face
            }
            None => defaults.face,
        };

        let unlocked = match store.get(UNLOCK_KEY) {
            Some(json) => match serde_json::from_str::<Vec<u8>>(&json) {
                Ok(flags) if flags.len() == SKIN_COUNT => {
                    let mut unlocked = [false; SKIN_COUNT];
                    for (slot, flag) in unlocked.iter_mut().zip(&flags) {
                        *slot = *flag != 0;
                    }
                    unlocked[FREE_SKIN_INDEX] = true;
                    unlocked
                }
                _ => {
                    log::warn!("Ignoring malformed unlock list: {}", json);
                    defaults.unlocked
                }
            },
            None => defaults.unlocked,
        };

        log::info!("Loaded profile: {} gems, face {}", gems, face);
        Self {
            gems,
            unlocked,
            face,
        }
    }

    pub fn save_gems(&self, store: &mut impl KeyValueStore) -> Result<(), StorageError> {
        store.set(GEMS_KEY, &self.gems.to_string())
    }

    pub fn save_unlocks(&self, store: &mut impl KeyValueStore) -> Result<(), StorageError> {
        let flags: Vec<u8> = self.unlocked.iter().map(|&u| u as u8).collect();
        store.set(UNLOCK_KEY, &serde_json::to_string(&flags)?)
    }

    pub fn save_face(&self, store: &mut impl KeyValueStore) -> Result<(), StorageError> {
        store.set(FACE_KEY, &self.face.to_string())
    }

    pub fn is_unlocked(&self, index: usize) -> bool {
        self.unlocked.get(index).copied().unwrap_or(false)
    }

    /// Zero-based slot of the equipped face
    pub fn equipped_index(&self) -> usize {
        usize::from(self.face.saturating_sub(1))
    }

    /// Add gems from a pickup
    pub fn credit(&mut self, value: u32) {
        self.gems = self.gems.saturating_add(value);
    }

    /// Buy the face at `index`, debiting its price and persisting both the
    /// new balance and the unlock flags. On a failed write the profile is
    /// left unchanged.
    pub fn buy(&mut self, index: usize, store: &mut impl KeyValueStore) -> Result<(), ShopError> {
        let price = *PRICES.get(index).ok_or(ShopError::UnknownItem(index))?;
        if self.unlocked[index] {
            return Err(ShopError::AlreadyOwned(index));
        }
        if self.gems < price {
            return Err(ShopError::InsufficientGems {
                price,
                balance: self.gems,
            });
        }

        // Memory only changes once both writes went through
        let mut next = self.clone();
        next.gems -= price;
        next.unlocked[index] = true;
        next.save_unlocks(store)?;
        next.save_gems(store)?;

        *self = next;
        log::info!("Bought face {} for {} gems ({} left)", index + 1, price, self.gems);
        Ok(())
    }

    /// Equip an unlocked face and persist the choice
    pub fn equip(&mut self, index: usize, store: &mut impl KeyValueStore) -> Result<(), ShopError> {
        if index >= SKIN_COUNT {
            return Err(ShopError::UnknownItem(index));
        }
        if !self.unlocked[index] {
            return Err(ShopError::Locked(index));
        }

        let next = Profile {
            face: index as u8 + 1,
            ..self.clone()
        };
        next.save_face(store)?;

        *self = next;
        log::info!("Equipped face {}", self.face);
        Ok(())
    }

    /// Shop rows in slot order
    pub fn listing(&self) -> Vec<ShopEntry> {
        PRICES
            .iter()
            .enumerate()
            .map(|(index, &price)| {
                let action = if !self.unlocked[index] {
                    ShopAction::Buy
                } else if index == self.equipped_index() {
                    ShopAction::Equipped
                } else {
                    ShopAction::Equip
                };
                ShopEntry {
                    index,
                    price,
                    action,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;

    /// Reads work, every write is rejected
    struct ReadOnlyStore(MemoryStore);

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.get(key)
        }

        fn set(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Write {
                key: key.to_string(),
                reason: "quota exceeded".to_string(),
            })
        }
    }

    #[test]
    fn test_defaults_on_empty_store() {
        let profile = Profile::load(&MemoryStore::new());
        assert_eq!(profile.gems, 0);
        assert_eq!(profile.face, 6);
        assert_eq!(
            profile.unlocked,
            [false, false, false, false, false, true, false, false, false]
        );
    }

    #[test]
    fn test_load_persisted_values() {
        let store = MemoryStore::with_entries([
            (GEMS_KEY, "345"),
            (UNLOCK_KEY, "[1,0,0,0,0,1,0,0,1]"),
            (FACE_KEY, "9"),
        ]);
        let profile = Profile::load(&store);
        assert_eq!(profile.gems, 345);
        assert_eq!(profile.face, 9);
        assert!(profile.is_unlocked(0));
        assert!(profile.is_unlocked(8));
        assert!(!profile.is_unlocked(1));
    }

    #[test]
    fn test_malformed_values_fall_back() {
        let store = MemoryStore::with_entries([
            (GEMS_KEY, "lots"),
            (UNLOCK_KEY, "[1,1]"),
            (FACE_KEY, "0"),
        ]);
        assert_eq!(Profile::load(&store), Profile::default());
    }

    #[test]
    fn test_free_slot_always_unlocked() {
        let store = MemoryStore::with_entries([(UNLOCK_KEY, "[0,0,0,0,0,0,0,0,0]")]);
        assert!(Profile::load(&store).is_unlocked(FREE_SKIN_INDEX));
    }

    #[test]
    fn test_buy_insufficient_gems() {
        let mut store = MemoryStore::new();
        let mut profile = Profile::default();

        let err = profile.buy(0, &mut store).unwrap_err();
        assert!(matches!(
            err,
            ShopError::InsufficientGems {
                price: 1000,
                balance: 0
            }
        ));
        assert_eq!(profile.gems, 0);
        assert!(!profile.is_unlocked(0));
        assert_eq!(store.get(GEMS_KEY), None);
        assert_eq!(store.get(UNLOCK_KEY), None);
    }

    #[test]
    fn test_buy_exact_balance() {
        let mut store = MemoryStore::new();
        let mut profile = Profile {
            gems: 1000,
            ..Default::default()
        };

        profile.buy(0, &mut store).unwrap();
        assert_eq!(profile.gems, 0);
        assert!(profile.is_unlocked(0));
        assert_eq!(store.get(GEMS_KEY).as_deref(), Some("0"));
        assert_eq!(
            store.get(UNLOCK_KEY).as_deref(),
            Some("[1,0,0,0,0,1,0,0,0]")
        );

        // Reload sees the purchase
        let reloaded = Profile::load(&store);
        assert_eq!(reloaded, profile);
    }

    #[test]
    fn test_buy_owned_or_unknown() {
        let mut store = MemoryStore::new();
        let mut profile = Profile {
            gems: 5000,
            ..Default::default()
        };
        assert!(matches!(
            profile.buy(FREE_SKIN_INDEX, &mut store),
            Err(ShopError::AlreadyOwned(5))
        ));
        assert!(matches!(
            profile.buy(9, &mut store),
            Err(ShopError::UnknownItem(9))
        ));
        assert_eq!(profile.gems, 5000);
    }

    #[test]
    fn test_equip() {
        let mut store = MemoryStore::new();
        let mut profile = Profile {
            gems: 150,
            ..Default::default()
        };
        profile.buy(8, &mut store).unwrap();
        profile.equip(8, &mut store).unwrap();
        assert_eq!(profile.face, 9);
        assert_eq!(store.get(FACE_KEY).as_deref(), Some("9"));

        assert!(matches!(
            profile.equip(0, &mut store),
            Err(ShopError::Locked(0))
        ));
        assert_eq!(profile.face, 9);
    }

    #[test]
    fn test_failed_write_leaves_profile_unchanged() {
        let mut store = ReadOnlyStore(MemoryStore::new());
        let mut profile = Profile {
            gems: 2000,
            ..Default::default()
        };
        profile.unlocked[3] = true;
        let before = profile.clone();

        assert!(matches!(
            profile.buy(0, &mut store),
            Err(ShopError::Storage(StorageError::Write { .. }))
        ));
        assert_eq!(profile, before);

        assert!(matches!(
            profile.equip(3, &mut store),
            Err(ShopError::Storage(_))
        ));
        assert_eq!(profile, before);
    }

    #[test]
    fn test_listing_actions() {
        let mut profile = Profile::default();
        profile.unlocked[2] = true;

        let listing = profile.listing();
        assert_eq!(listing.len(), SKIN_COUNT);
        assert_eq!(listing[0].action, ShopAction::Buy);
        assert_eq!(listing[0].price, 1000);
        assert_eq!(listing[2].action, ShopAction::Equip);
        assert_eq!(listing[5].action, ShopAction::Equipped);
        assert_eq!(listing[5].price, 0);
        assert_eq!(listing[5].action.label(), "EQUIPPED");
    }
}
