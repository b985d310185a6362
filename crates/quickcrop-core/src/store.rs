//! Per-preset transform table.
//!
//! Presets live in a fixed arena indexed by their configuration order, with a
//! lookup map from id to slot. Every write bumps the slot's revision, which is
//! how stale pointer edits are detected.

use crate::error::SessionError;
use crate::preset::{PresetConfig, PresetId};
use crate::transform::CropTransform;
use std::collections::HashMap;

/// One preset's entry in the store.
#[derive(Debug, Clone, PartialEq)]
pub struct PresetSlot {
    pub config: PresetConfig,
    pub transform: CropTransform,
    /// Incremented on every transform write.
    pub revision: u64,
    /// Whether the user allowed zooming past native resolution.
    pub upscale_allowed: bool,
}

/// Mapping from preset id to its current crop transform.
#[derive(Debug, Clone)]
pub struct PresetTransformStore {
    slots: Vec<PresetSlot>,
    index: HashMap<PresetId, usize>,
}

impl PresetTransformStore {
    /// Build the store from the session's preset list.
    ///
    /// Fails on an empty list, an invalid preset, or a duplicate id.
    pub fn new(presets: Vec<PresetConfig>) -> Result<Self, SessionError> {
        if presets.is_empty() {
            return Err(SessionError::NoPresets);
        }

        let mut slots = Vec::with_capacity(presets.len());
        let mut index = HashMap::with_capacity(presets.len());
        for config in presets {
            config.validate()?;
            if index.contains_key(&config.id) {
                return Err(SessionError::DuplicatePreset(config.id));
            }
            index.insert(config.id.clone(), slots.len());
            slots.push(PresetSlot {
                config,
                transform: CropTransform::identity(),
                revision: 0,
                upscale_allowed: false,
            });
        }

        Ok(Self { slots, index })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, id: &PresetId) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &PresetId) -> Option<&PresetSlot> {
        self.index.get(id).map(|&i| &self.slots[i])
    }

    pub(crate) fn get_mut(&mut self, id: &PresetId) -> Option<&mut PresetSlot> {
        match self.index.get(id) {
            Some(&i) => Some(&mut self.slots[i]),
            None => None,
        }
    }

    /// Look up a slot, reporting unknown ids as a configuration error.
    pub fn require(&self, id: &PresetId) -> Result<&PresetSlot, SessionError> {
        self.get(id)
            .ok_or_else(|| SessionError::UnknownPreset(id.clone()))
    }

    pub fn transform(&self, id: &PresetId) -> Option<&CropTransform> {
        self.get(id).map(|slot| &slot.transform)
    }

    /// Preset ids in configuration order.
    pub fn ids(&self) -> impl Iterator<Item = &PresetId> {
        self.slots.iter().map(|slot| &slot.config.id)
    }

    pub fn first_id(&self) -> &PresetId {
        &self.slots[0].config.id
    }

    /// The id after (or before, when `reverse`) `current`, wrapping around.
    pub fn cycle(&self, current: &PresetId, reverse: bool) -> &PresetId {
        let len = self.slots.len();
        let i = self.index.get(current).copied().unwrap_or(0);
        let next = if reverse { (i + len - 1) % len } else { (i + 1) % len };
        &self.slots[next].config.id
    }

    /// Replace a preset's transform, returning the new revision.
    pub fn write(&mut self, id: &PresetId, transform: CropTransform) -> Option<u64> {
        let slot = self.get_mut(id)?;
        slot.transform = transform;
        slot.revision += 1;
        Some(slot.revision)
    }

    /// Reset every transform to identity. Configuration and upscale flags are
    /// kept; revisions keep increasing so edits from the previous image are stale.
    pub fn reinitialize(&mut self) {
        for slot in &mut self.slots {
            slot.transform = CropTransform::identity();
            slot.revision += 1;
        }
    }
}
