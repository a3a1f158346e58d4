//! Window registry: the single owner of every live surface.
//!
//! Surfaces are addressed by name from the outside and by [`SurfaceId`]
//! internally. Names that were registered and later closed are
//! remembered so lookups can distinguish "closed" from "never created".

mod handle;
mod placement;


use std::collections::{HashMap, HashSet};

use sightline_common::{Placement, ShellError, SurfaceId, Unavailability};
use sightline_config::SurfaceDescriptor;
use tracing::{debug, info, warn};

use crate::backend::{OpenRequest, SurfaceBackend};

pub use handle::{ClosedSurface, LoadState, SurfaceHandle};
pub use placement::{restore as restore_placement, PlacementStore};

pub struct SurfaceRegistry {
    next_id: u32,
    handles: HashMap<String, SurfaceHandle>,
    names: HashMap<SurfaceId, String>,
    closed: HashSet<String>,
    placements: PlacementStore,
}

impl SurfaceRegistry {
    pub fn new(placements: PlacementStore) -> Self {
        Self {
            next_id: 1,
            handles: HashMap::new(),
            names: HashMap::new(),
            closed: HashSet::new(),
            placements,
        }
    }

    /// Open a native window for `descriptor` and register it.
    ///
    /// The saved placement is restored when it still lands on a monitor;
    /// otherwise the descriptor's default size is used and the OS picks
    /// the position. Nothing is registered if the backend fails.
    pub fn create_surface<B: SurfaceBackend>(
        &mut self,
        backend: &mut B,
        descriptor: &SurfaceDescriptor,
    ) -> Result<SurfaceId, ShellError> {
        if self.handles.contains_key(&descriptor.name) {
            return Err(ShellError::DuplicateSurface(descriptor.name.clone()));
        }

        let monitors = backend.monitors();
        let saved = self.placements.get(&descriptor.name);
        let restored = restore_placement(saved, &monitors);
        if saved.is_some() && restored.is_none() {
            debug!(surface = %descriptor.name, "saved placement is off-screen, using defaults");
        }

        let id = SurfaceId(self.next_id);
        let request = OpenRequest {
            id,
            name: &descriptor.name,
            title: descriptor.title(),
            position: restored.map(|p| (p.x, p.y)),
            size: restored
                .map(|p| p.dimensions())
                .unwrap_or_else(|| descriptor.dimensions()),
            visible: descriptor.visible,
        };
        let placement = backend.open(&request)?;
        self.next_id += 1;

        self.handles.insert(
            descriptor.name.clone(),
            SurfaceHandle {
                id,
                descriptor: descriptor.clone(),
                visible: descriptor.visible,
                placement,
                load: LoadState::Pending,
            },
        );
        self.names.insert(id, descriptor.name.clone());
        self.closed.remove(&descriptor.name);

        info!(
            surface = %descriptor.name,
            %id,
            visible = descriptor.visible,
            interactive = descriptor.interactive,
            "surface created"
        );
        Ok(id)
    }

    /// The live surface with this name, if any.
    pub fn get_surface(&self, name: &str) -> Option<&SurfaceHandle> {
        self.handles.get(name)
    }

    pub fn get_by_id(&self, id: SurfaceId) -> Option<&SurfaceHandle> {
        self.names.get(&id).and_then(|n| self.handles.get(n))
    }

    pub fn name_of(&self, id: SurfaceId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// Like [`get_surface`](Self::get_surface) but says why a name is
    /// missing.
    pub fn lookup(&self, name: &str) -> Result<&SurfaceHandle, ShellError> {
        self.handles.get(name).ok_or_else(|| {
            let reason = if self.closed.contains(name) {
                Unavailability::Closed
            } else {
                Unavailability::NeverCreated
            };
            ShellError::unavailable(name, reason)
        })
    }

    /// Show or hide a surface. Returns whether the visibility changed;
    /// asking for the current state is a no-op.
    pub fn set_visible<B: SurfaceBackend>(
        &mut self,
        backend: &mut B,
        name: &str,
        visible: bool,
    ) -> Result<bool, ShellError> {
        let id = self.lookup(name)?.id;
        let Some(handle) = self.handles.get_mut(name) else {
            return Ok(false);
        };
        if handle.visible == visible {
            return Ok(false);
        }
        backend.set_visible(id, visible)?;
        handle.visible = visible;
        debug!(surface = %name, visible, "visibility changed");
        Ok(true)
    }

    pub fn set_load_state(&mut self, id: SurfaceId, state: LoadState) {
        if let Some(handle) = self
            .names
            .get(&id)
            .and_then(|n| self.handles.get_mut(n))
        {
            handle.load = state;
        }
    }

    pub fn record_moved(&mut self, id: SurfaceId, x: i32, y: i32) {
        self.update_placement(id, |p| {
            p.x = x;
            p.y = y;
        });
    }

    pub fn record_resized(&mut self, id: SurfaceId, width: u32, height: u32) {
        self.update_placement(id, |p| {
            p.width = width;
            p.height = height;
        });
    }

    fn update_placement(&mut self, id: SurfaceId, f: impl FnOnce(&mut Placement)) {
        let Some(name) = self.names.get(&id) else {
            return;
        };
        let Some(handle) = self.handles.get_mut(name) else {
            return;
        };
        f(&mut handle.placement);
        self.placements.save(name, handle.placement);
    }

    /// Close and unregister a surface. Unknown ids return `None`.
    pub fn close_surface<B: SurfaceBackend>(
        &mut self,
        backend: &mut B,
        id: SurfaceId,
    ) -> Option<ClosedSurface> {
        let name = self.names.remove(&id)?;
        let Some(handle) = self.handles.remove(&name) else {
            warn!(%id, surface = %name, "registry out of sync: id without handle");
            return None;
        };

        self.placements.save(&name, handle.placement);
        backend.close(id);
        self.closed.insert(name.clone());

        let interactive = handle.is_interactive();
        let last_interactive = interactive && self.interactive_count() == 0;
        info!(surface = %name, %id, last_interactive, "surface closed");

        Some(ClosedSurface {
            id,
            name,
            interactive,
            last_interactive,
        })
    }

    /// Close every remaining surface, returning what was closed.
    pub fn close_all<B: SurfaceBackend>(&mut self, backend: &mut B) -> Vec<ClosedSurface> {
        let mut ids: Vec<SurfaceId> = self.names.keys().copied().collect();
        ids.sort();
        ids.into_iter()
            .filter_map(|id| self.close_surface(backend, id))
            .collect()
    }

    /// Number of open main-interactive surfaces.
    pub fn interactive_count(&self) -> usize {
        self.handles.values().filter(|h| h.is_interactive()).count()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Live surfaces in creation order.
    pub fn surfaces(&self) -> Vec<&SurfaceHandle> {
        let mut list: Vec<&SurfaceHandle> = self.handles.values().collect();
        list.sort_by_key(|h| h.id);
        list
    }
}

impl Default for SurfaceRegistry {
    fn default() -> Self {
        Self::new(PlacementStore::in_memory())
    }
}
