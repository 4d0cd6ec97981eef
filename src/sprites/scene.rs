//! Sprite bookkeeping for a preview scene.
//!
//! [`SceneModel`] decides what happens to each layer when a new
//! [`LayerSet`] arrives and records the resulting sprite instances. It emits
//! [`SpriteOp`]s instead of touching the ECS, so the preview systems apply
//! them with `Commands` while the decisions themselves stay plain data.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{AnimationSynchronizer, Direction, Layer, LayerSet, PreviewError, SheetKey, TextureKey};

/// Stable identity of a sprite instance within one scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpriteId(pub u64);

/// One drawable bound to a (layer, direction) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteInstance {
    pub id: SpriteId,
    pub layer: String,
    pub direction: Direction,
    pub key: TextureKey,
    /// Atlas frame at creation; later frames come from the synchronizer.
    pub frame: usize,
}

/// A change the preview systems must mirror in the world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpriteOp {
    Spawn {
        id: SpriteId,
        layer: String,
        direction: Direction,
        key: TextureKey,
        frame: usize,
    },
    Despawn {
        id: SpriteId,
    },
    SwapTexture {
        id: SpriteId,
        key: TextureKey,
    },
}

/// What an incoming layer selection means for the current scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerChange {
    /// Style is "None": drop all sprites of the layer.
    Remove,
    /// Layer is not on screen yet.
    Create,
    /// Style differs: sprites are destroyed and recreated.
    Restyle,
    /// Only the color differs: textures are swapped in place.
    Recolor,
    Unchanged,
}

impl LayerChange {
    /// Whether applying this change needs the layer's base sheet.
    pub fn needs_sheet(self) -> bool {
        matches!(
            self,
            LayerChange::Create | LayerChange::Restyle | LayerChange::Recolor
        )
    }
}

/// Outcome of applying a whole layer set.
#[derive(Debug, Default)]
pub struct UpdateReport {
    pub ops: Vec<SpriteOp>,
    /// Layers left in their previous state because their sheet failed.
    pub skipped: Vec<(String, PreviewError)>,
}

/// Active layers and sprite instances of one scene.
#[derive(Debug, Default)]
pub struct SceneModel {
    active: BTreeMap<String, Layer>,
    instances: BTreeMap<(String, Direction), SpriteInstance>,
    next_id: u64,
}

impl SceneModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plan(&self, layer: &Layer) -> LayerChange {
        match self.active.get(&layer.name) {
            _ if layer.is_none() => LayerChange::Remove,
            None => LayerChange::Create,
            Some(current) if current.style != layer.style => LayerChange::Restyle,
            Some(current) if current.color != layer.color => LayerChange::Recolor,
            Some(_) => LayerChange::Unchanged,
        }
    }

    /// Base sheets a set would need, in processing order, without duplicates.
    pub fn required_sheets(&self, set: &LayerSet) -> Vec<SheetKey> {
        let mut sheets: Vec<SheetKey> = Vec::new();
        for layer in set.iter() {
            if self.plan(&layer).needs_sheet() {
                let sheet = layer.sheet_key();
                if !sheets.contains(&sheet) {
                    sheets.push(sheet);
                }
            }
        }
        sheets
    }

    /// Apply a single layer selection. The layer's sheet must be available.
    pub fn apply_layer(&mut self, layer: &Layer, sync: &mut AnimationSynchronizer) -> Vec<SpriteOp> {
        match self.plan(layer) {
            LayerChange::Remove => self.remove_layer(&layer.name, sync),
            LayerChange::Create => self.spawn_layer(layer, sync),
            LayerChange::Restyle => {
                let mut ops = self.remove_layer(&layer.name, sync);
                ops.extend(self.spawn_layer(layer, sync));
                ops
            }
            LayerChange::Recolor => self.recolor_layer(layer),
            LayerChange::Unchanged => Vec::new(),
        }
    }

    /// Apply a full layer set. Layers absent from the set are removed.
    /// `sheet_status` reports whether a layer's base sheet is usable; layers
    /// whose sheet failed keep their previous sprites.
    pub fn apply_set<F>(
        &mut self,
        set: &LayerSet,
        sync: &mut AnimationSynchronizer,
        sheet_status: F,
    ) -> UpdateReport
    where
        F: Fn(&SheetKey) -> Result<(), PreviewError>,
    {
        let mut report = UpdateReport::default();

        let stale: Vec<String> = self
            .active
            .keys()
            .filter(|name| !set.contains(name))
            .cloned()
            .collect();
        for name in stale {
            report.ops.extend(self.remove_layer(&name, sync));
        }

        for layer in set.iter() {
            if self.plan(&layer).needs_sheet() {
                if let Err(error) = sheet_status(&layer.sheet_key()) {
                    report.skipped.push((layer.name.clone(), error));
                    continue;
                }
            }
            report.ops.extend(self.apply_layer(&layer, sync));
        }

        report
    }

    /// Drop every sprite of a layer and forget the layer.
    pub fn remove_layer(&mut self, name: &str, sync: &mut AnimationSynchronizer) -> Vec<SpriteOp> {
        self.active.remove(name);
        sync.unregister_layer(name);

        Direction::ALL
            .iter()
            .filter_map(|direction| self.instances.remove(&(name.to_string(), *direction)))
            .map(|instance| SpriteOp::Despawn { id: instance.id })
            .collect()
    }

    /// Remove everything; used on scene teardown.
    pub fn clear(&mut self, sync: &mut AnimationSynchronizer) -> Vec<SpriteOp> {
        let names: Vec<String> = self.active.keys().cloned().collect();
        names
            .iter()
            .flat_map(|name| self.remove_layer(name, sync))
            .collect()
    }

    fn spawn_layer(&mut self, layer: &Layer, sync: &mut AnimationSynchronizer) -> Vec<SpriteOp> {
        let key = layer.texture_key();
        let mut ops = Vec::with_capacity(Direction::ALL.len());

        for direction in Direction::ALL {
            let id = SpriteId(self.next_id);
            self.next_id += 1;

            let frame = sync.register_late(&layer.name, direction, id);
            self.instances.insert(
                (layer.name.clone(), direction),
                SpriteInstance {
                    id,
                    layer: layer.name.clone(),
                    direction,
                    key: key.clone(),
                    frame,
                },
            );
            ops.push(SpriteOp::Spawn {
                id,
                layer: layer.name.clone(),
                direction,
                key: key.clone(),
                frame,
            });
        }

        self.active.insert(layer.name.clone(), layer.clone());
        ops
    }

    fn recolor_layer(&mut self, layer: &Layer) -> Vec<SpriteOp> {
        let key = layer.texture_key();
        let mut ops = Vec::new();

        for direction in Direction::ALL {
            if let Some(instance) = self.instances.get_mut(&(layer.name.clone(), direction)) {
                instance.key = key.clone();
                ops.push(SpriteOp::SwapTexture {
                    id: instance.id,
                    key: key.clone(),
                });
            }
        }

        self.active.insert(layer.name.clone(), layer.clone());
        ops
    }

    pub fn active_layer(&self, name: &str) -> Option<&Layer> {
        self.active.get(name)
    }

    pub fn instance(&self, layer: &str, direction: Direction) -> Option<&SpriteInstance> {
        self.instances.get(&(layer.to_string(), direction))
    }

    pub fn instances(&self) -> impl Iterator<Item = &SpriteInstance> {
        self.instances.values()
    }

    pub fn instances_for_layer<'a>(
        &'a self,
        layer: &'a str,
    ) -> impl Iterator<Item = &'a SpriteInstance> + 'a {
        self.instances.values().filter(move |i| i.layer == layer)
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }
}

/// What to do with an update that arrives while another is in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdatePolicy {
    /// Ignore it; the host's next change supersedes it.
    #[default]
    Drop,
    /// Keep only the most recent one and run it after the current update.
    KeepLatest,
}

/// Result of asking the guard to start an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Started,
    Dropped,
    /// Stored in the single pending slot (replacing any older request).
    Queued,
    /// Identical to the set already in flight; nothing to do.
    AlreadyInFlight,
}

/// Ensures at most one layer-set update is in flight per scene.
#[derive(Debug, Default)]
pub struct UpdateGuard {
    policy: UpdatePolicy,
    in_flight: Option<LayerSet>,
    pending: Option<LayerSet>,
}

impl UpdateGuard {
    pub fn new(policy: UpdatePolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    pub fn begin(&mut self, set: LayerSet) -> UpdateOutcome {
        let Some(in_flight) = &self.in_flight else {
            self.in_flight = Some(set);
            return UpdateOutcome::Started;
        };

        if *in_flight == set {
            // The newest request is already running, so anything queued is stale
            self.pending = None;
            return UpdateOutcome::AlreadyInFlight;
        }

        match self.policy {
            UpdatePolicy::Drop => UpdateOutcome::Dropped,
            UpdatePolicy::KeepLatest => {
                self.pending = Some(set);
                UpdateOutcome::Queued
            }
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<&LayerSet> {
        self.in_flight.as_ref()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Mark the current update done and hand back the queued request, if any.
    pub fn finish(&mut self) -> Option<LayerSet> {
        self.in_flight = None;
        self.pending.take()
    }

    /// Forget all in-flight and queued work (scene teardown).
    pub fn reset(&mut self) {
        self.in_flight = None;
        self.pending = None;
    }
}
