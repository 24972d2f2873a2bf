//! Deck compatibility checks for the protocol designer's drag-and-drop deck.
//!
//! Everything here is advisory: callers decide whether to reject a drop.

use shared::{
    domain::{LabwareId, ModuleType, SlotId},
    error::CoreError,
    protocol::{LabwareOnDeck, PipetteOnDeck},
};
use tracing::debug;

pub mod compatibility;
pub mod layout;

pub use compatibility::{
    incompatibility_quirk, is_labware_compatible_with_module, is_labware_custom,
    CustomLabwareDefs,
};
pub use layout::{DeckLayout, ModulesBySlot};

/// Pipettes whose gen-1 multichannel heads clip tall gen-1 modules.
pub const GEN_ONE_MULTI_PIPETTES: [&str; 3] = ["p10_multi", "p50_multi", "p300_multi"];

/// Module slot and the slot behind it that gets the collision warning.
const COLLISION_WARNING_SLOTS: [(&str, &str); 2] = [("1", "4"), ("3", "6")];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckerConfig {
    /// Hide module placement warnings, e.g. gen-1 multichannel collisions.
    pub disable_module_restrictions: bool,
}

#[derive(Debug, Clone, Default)]
pub struct CompatibilityChecker {
    config: CheckerConfig,
}

impl CompatibilityChecker {
    pub fn new(config: CheckerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    /// Whether swapping `dragged` with `hovered` puts either onto a module it
    /// does not fit. Custom labware skips the check for its own destination
    /// only; the other side is still checked.
    pub fn is_swap_blocked(
        &self,
        dragged: Option<&LabwareOnDeck>,
        hovered: Option<&LabwareOnDeck>,
        modules_by_slot: &ModulesBySlot,
        custom_defs: &CustomLabwareDefs,
    ) -> bool {
        let (Some(dragged), Some(hovered)) = (dragged, hovered) else {
            return false;
        };

        let source_module_type = modules_by_slot.get(&dragged.slot).copied();
        let dest_module_type = modules_by_slot.get(&hovered.slot).copied();

        let source_to_dest_blocked =
            compatibility::placement_blocked(hovered, source_module_type, custom_defs);
        let dest_to_source_blocked =
            compatibility::placement_blocked(dragged, dest_module_type, custom_defs);

        let blocked = source_to_dest_blocked || dest_to_source_blocked;
        if blocked {
            debug!(
                dragged = %dragged.id,
                hovered = %hovered.id,
                source_to_dest_blocked,
                dest_to_source_blocked,
                "labware swap blocked"
            );
        }
        blocked
    }

    /// Whether dropping `dragged` onto an empty slot hosting `target_module_type`
    /// is blocked.
    pub fn is_move_blocked(
        &self,
        dragged: &LabwareOnDeck,
        target_module_type: Option<ModuleType>,
        custom_defs: &CustomLabwareDefs,
    ) -> bool {
        compatibility::placement_blocked(dragged, target_module_type, custom_defs)
    }

    /// Swap check by labware id against a validated layout.
    pub fn check_swap(
        &self,
        layout: &DeckLayout<'_>,
        dragged: &LabwareId,
        hovered: Option<&LabwareId>,
        custom_defs: &CustomLabwareDefs,
    ) -> Result<bool, CoreError> {
        let dragged = lookup(layout, dragged)?;
        let hovered = hovered.map(|id| lookup(layout, id)).transpose()?;
        Ok(self.is_swap_blocked(
            Some(dragged),
            hovered,
            layout.modules_by_slot(),
            custom_defs,
        ))
    }

    /// Slots that should show a gen-1 multichannel collision warning.
    pub fn collision_warning_slots(&self, layout: &DeckLayout<'_>) -> Vec<SlotId> {
        if self.config.disable_module_restrictions
            || !has_gen_one_multichannel(layout.snapshot().pipettes.values())
        {
            return Vec::new();
        }

        COLLISION_WARNING_SLOTS
            .iter()
            .filter(|(module_slot, _)| {
                layout
                    .module_in_slot(module_slot)
                    .is_some_and(|module| module.model.has_collision_issues())
            })
            .map(|&(_, warning_slot)| warning_slot.into())
            .collect()
    }
}

fn lookup<'a>(layout: &DeckLayout<'a>, id: &LabwareId) -> Result<&'a LabwareOnDeck, CoreError> {
    layout
        .labware(id)
        .ok_or_else(|| CoreError::invalid(format!("no labware with id {id} on deck")))
}

fn has_gen_one_multichannel<'p>(mut pipettes: impl Iterator<Item = &'p PipetteOnDeck>) -> bool {
    pipettes.any(|pipette| GEN_ONE_MULTI_PIPETTES.contains(&pipette.name.as_str()))
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
