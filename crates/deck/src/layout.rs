use std::collections::{BTreeMap, BTreeSet};

use shared::{
    domain::{LabwareId, ModuleType, SlotId},
    error::CoreError,
    protocol::{DeckSetupSnapshot, LabwareOnDeck, ModuleOnDeck},
};
use tracing::warn;

/// Module type keyed by every slot id a labware may reference to sit on it:
/// the module's own id and the deck slot it occupies.
pub type ModulesBySlot = BTreeMap<SlotId, ModuleType>;

pub const DECK_SLOTS: [&str; 12] = ["1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12"];
/// Pseudo-slot a thermocycler occupies.
pub const SPAN7_8_10_11_SLOT: &str = "span7_8_10_11";
pub const SLOTS_SPANNED_BY_THERMOCYCLER: [&str; 4] = ["7", "8", "10", "11"];
pub const FIXED_TRASH_QUIRK: &str = "fixedTrash";

/// Read-only view of a deck setup with its occupancy invariants checked.
#[derive(Debug)]
pub struct DeckLayout<'a> {
    setup: &'a DeckSetupSnapshot,
    modules_by_slot: ModulesBySlot,
}

impl<'a> DeckLayout<'a> {
    /// Fails when two modules share a slot or two labware share a slot.
    pub fn from_snapshot(setup: &'a DeckSetupSnapshot) -> Result<Self, CoreError> {
        let mut modules_by_slot = ModulesBySlot::new();
        let mut module_slots = BTreeSet::new();
        for module in setup.modules.values() {
            if !module_slots.insert(&module.slot) {
                return Err(CoreError::invalid(format!(
                    "slot {} holds more than one module",
                    module.slot
                )));
            }
            modules_by_slot.insert(module.id.as_str().into(), module.module_type);
            modules_by_slot.insert(module.slot.clone(), module.module_type);
        }

        let mut labware_slots = BTreeSet::new();
        for labware in setup.labware.values() {
            let physical = physical_slot(setup, &labware.slot);
            if !labware_slots.insert(physical) {
                return Err(CoreError::invalid(format!(
                    "slot {physical} holds more than one labware (second is {})",
                    labware.id
                )));
            }
        }

        Ok(Self {
            setup,
            modules_by_slot,
        })
    }

    pub fn snapshot(&self) -> &'a DeckSetupSnapshot {
        self.setup
    }

    pub fn modules_by_slot(&self) -> &ModulesBySlot {
        &self.modules_by_slot
    }

    pub fn module_type_at(&self, slot: &SlotId) -> Option<ModuleType> {
        self.modules_by_slot.get(slot).copied()
    }

    pub fn labware(&self, id: &LabwareId) -> Option<&'a LabwareOnDeck> {
        self.setup.labware.get(id)
    }

    pub fn module_in_slot(&self, slot: &str) -> Option<&'a ModuleOnDeck> {
        self.setup
            .modules
            .values()
            .find(|module| module.slot.as_str() == slot)
    }

    /// Labware the user can drag: everything but the fixed trash, skipping
    /// entries whose slot is neither a deck slot nor a module.
    pub fn movable_labware(&self) -> Vec<&'a LabwareOnDeck> {
        self.setup
            .labware
            .values()
            .filter(|labware| !labware.def.has_quirk(FIXED_TRASH_QUIRK))
            .filter(|labware| {
                let known = self.is_known_slot(&labware.slot);
                if !known {
                    warn!(
                        labware_id = %labware.id,
                        slot = %labware.slot,
                        "labware references unknown slot"
                    );
                }
                known
            })
            .collect()
    }

    pub fn slots_blocked_by_spanning(&self) -> Vec<SlotId> {
        let has_thermocycler = self
            .setup
            .modules
            .values()
            .any(|module| {
                module.module_type == ModuleType::ThermocyclerModuleType
                    && module.slot.as_str() == SPAN7_8_10_11_SLOT
            });
        if has_thermocycler {
            SLOTS_SPANNED_BY_THERMOCYCLER
                .iter()
                .map(|&slot| slot.into())
                .collect()
        } else {
            Vec::new()
        }
    }

    /// A module's slot is empty when no labware sits on it; a deck slot is
    /// empty when it is not spanned and holds neither module nor labware.
    pub fn is_slot_empty(&self, slot: &SlotId) -> bool {
        if self.setup.modules.keys().any(|id| id.as_str() == slot.as_str()) {
            return !self.setup.labware.values().any(|l| &l.slot == slot);
        }
        if slot.as_str() == SPAN7_8_10_11_SLOT || self.slots_blocked_by_spanning().contains(slot) {
            return false;
        }
        self.module_in_slot(slot.as_str()).is_none()
            && !self.setup.labware.values().any(|l| &l.slot == slot)
    }

    fn is_known_slot(&self, slot: &SlotId) -> bool {
        DECK_SLOTS.contains(&slot.as_str())
            || slot.as_str() == SPAN7_8_10_11_SLOT
            || self.setup.modules.keys().any(|id| id.as_str() == slot.as_str())
    }
}

/// Deck slot a labware physically occupies, following module parents.
fn physical_slot<'s>(setup: &'s DeckSetupSnapshot, slot: &'s SlotId) -> &'s SlotId {
    setup
        .modules
        .values()
        .find(|module| module.id.as_str() == slot.as_str())
        .map(|module| &module.slot)
        .unwrap_or(slot)
}
