//! In-memory backend that records every call, for unit tests.

use std::collections::{HashMap, HashSet};

use sightline_common::{Placement, ShellError, SurfaceId};

use crate::backend::{OpenRequest, SurfaceBackend};
use crate::bridge::OutboundEnvelope;
use crate::loader::ContentLocation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenedWindow {
    pub id: SurfaceId,
    pub name: String,
    pub position: Option<(i32, i32)>,
    pub width: u32,
    pub height: u32,
    pub visible: bool,
}

#[derive(Default)]
pub struct RecordingBackend {
    pub opened: Vec<OpenedWindow>,
    pub loads: Vec<(SurfaceId, String)>,
    pub visibility: Vec<(SurfaceId, bool)>,
    pub delivered: Vec<(SurfaceId, OutboundEnvelope)>,
    pub closed: Vec<SurfaceId>,
    pub devtools: Vec<SurfaceId>,
    pub monitors: Vec<Placement>,
    /// Surface names whose `open` fails.
    pub fail_open: HashSet<String>,
    /// Surface ids whose `load` fails synchronously.
    pub fail_load: HashSet<SurfaceId>,
    live: HashMap<SurfaceId, String>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_monitors(monitors: Vec<Placement>) -> Self {
        Self {
            monitors,
            ..Self::default()
        }
    }

    /// Names of opened windows in open order.
    pub fn opened_names(&self) -> Vec<&str> {
        self.opened.iter().map(|w| w.name.as_str()).collect()
    }

    /// Envelopes delivered to one surface, as `(topic, payload)`.
    pub fn delivered_to(&self, id: SurfaceId) -> Vec<(String, serde_json::Value)> {
        self.delivered
            .iter()
            .filter(|(target, _)| *target == id)
            .map(|(_, env)| (env.topic.clone(), env.payload.clone()))
            .collect()
    }
}

impl SurfaceBackend for RecordingBackend {
    fn open(&mut self, request: &OpenRequest<'_>) -> Result<Placement, ShellError> {
        if self.fail_open.contains(request.name) {
            return Err(ShellError::Backend(format!(
                "cannot open window for '{}'",
                request.name
            )));
        }
        self.opened.push(OpenedWindow {
            id: request.id,
            name: request.name.to_string(),
            position: request.position,
            width: request.size.width,
            height: request.size.height,
            visible: request.visible,
        });
        self.live.insert(request.id, request.name.to_string());
        let (x, y) = request.position.unwrap_or((0, 0));
        Ok(Placement::new(
            x,
            y,
            request.size.width,
            request.size.height,
        ))
    }

    fn load(&mut self, id: SurfaceId, location: &ContentLocation) -> Result<(), ShellError> {
        if self.fail_load.contains(&id) {
            return Err(ShellError::Backend(format!("load failed for {id}")));
        }
        self.loads.push((id, location.as_str().to_string()));
        Ok(())
    }

    fn set_visible(&mut self, id: SurfaceId, visible: bool) -> Result<(), ShellError> {
        if !self.live.contains_key(&id) {
            return Err(ShellError::Backend(format!("no window for {id}")));
        }
        self.visibility.push((id, visible));
        Ok(())
    }

    fn deliver(&mut self, id: SurfaceId, envelope: &OutboundEnvelope) -> Result<(), ShellError> {
        if !self.live.contains_key(&id) {
            return Err(ShellError::Backend(format!("no window for {id}")));
        }
        self.delivered.push((id, envelope.clone()));
        Ok(())
    }

    fn close(&mut self, id: SurfaceId) {
        if self.live.remove(&id).is_some() {
            self.closed.push(id);
        }
    }

    fn monitors(&self) -> Vec<Placement> {
        self.monitors.clone()
    }

    fn open_devtools(&mut self, id: SurfaceId) {
        self.devtools.push(id);
    }
}
