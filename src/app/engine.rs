// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/engine.rs
//
// Crop engine: public operation surface tying model, drag, redraw,
// export and attachment together.

use std::fmt;
use std::rc::Rc;

use super::export::{ExportedImage, export_square};
use super::host::{HostHandle, ListenerId, ListenerTarget, PointerEvent};
use super::message::EngineMessage;
use super::observer::{ConstraintObservers, SubscriptionId};
use super::scheduler::FrameScheduler;
use crate::config::EngineConfig;
use crate::domain::crop::{CropModel, CropSquare, DragController, DragState};
use crate::domain::document::{ImageSource, SourceImage};
use crate::error::{CropError, CropResult};
use crate::ui::{DrawingSurface, RedrawPipeline};

/// Surface placement inside a host.
struct Attachment {
    host: HostHandle,
    drag_start: ListenerId,
}

/// Document-level listeners registered for the duration of a drag.
struct DragListeners {
    host: HostHandle,
    moved: ListenerId,
    released: ListenerId,
}

pub struct CropEngine {
    source: SourceImage,
    model: CropModel,
    drag: DragController,
    drag_listeners: Option<DragListeners>,
    surface: DrawingSurface,
    pipeline: RedrawPipeline,
    scheduler: FrameScheduler,
    observers: ConstraintObservers<CropEngine>,
    attachment: Option<Attachment>,
    removed: bool,
}

impl fmt::Debug for CropEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CropEngine")
            .field("source", &self.source)
            .field("square", &self.model.get())
            .field("drag", &self.drag.state())
            .field("attached", &self.attachment.is_some())
            .field("removed", &self.removed)
            .finish()
    }
}

impl CropEngine {
    /// Build an engine for a loaded image. The initial square is centered
    /// and a first repaint is scheduled.
    pub fn new(source: SourceImage, config: EngineConfig) -> CropResult<Self> {
        let (width, height) = source.dimensions();
        let model = CropModel::initialize(width, height, config.initial_side_ratio)?;
        let surface = DrawingSurface::new(width, height)?;
        let pipeline = RedrawPipeline::new(&config);

        let mut scheduler = FrameScheduler::default();
        scheduler.request();

        log::debug!("Crop engine ready for {width}x{height}, square {:?}", model.get());

        Ok(Self {
            source,
            model,
            drag: DragController::default(),
            drag_listeners: None,
            surface,
            pipeline,
            scheduler,
            observers: ConstraintObservers::default(),
            attachment: None,
            removed: false,
        })
    }

    /// Load `source` off the UI thread, then build the engine.
    pub async fn load(source: ImageSource, config: EngineConfig) -> CropResult<Self> {
        let image = SourceImage::load(source).await?;
        Self::new(image, config)
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Insert the drawing surface into `host` and start listening for drag
    /// starts on it. Attaching to the current host again is a no-op.
    pub fn set_element(&mut self, host: HostHandle) -> CropResult<()> {
        self.ensure_live()?;

        if let Some(current) = &self.attachment {
            if Rc::ptr_eq(&current.host, &host) {
                return Ok(());
            }
            self.detach();
        }

        let surface = self.surface.id();
        let drag_start = {
            let mut container = host.borrow_mut();
            container.insert_first(surface);
            container.add_listener(ListenerTarget::Surface(surface), PointerEvent::Press)
        };

        log::debug!("Attached {surface:?}");
        self.attachment = Some(Attachment { host, drag_start });
        Ok(())
    }

    /// Detach from the host, drop every listener and retire the engine.
    /// Later operations report [`CropError::Detached`].
    pub fn remove(&mut self) -> CropResult<()> {
        self.ensure_live()?;

        self.detach();
        self.scheduler.cancel();
        self.observers.clear();
        self.removed = true;
        Ok(())
    }

    pub fn is_attached(&self) -> bool {
        self.attachment.is_some()
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    fn detach(&mut self) {
        self.exit_drag();

        if let Some(Attachment { host, drag_start }) = self.attachment.take() {
            let mut container = host.borrow_mut();
            container.remove_listener(drag_start);
            if !container.remove_child(self.surface.id()) {
                log::warn!("{:?} was not a child of its host", self.surface.id());
            }
        }
    }

    fn ensure_live(&self) -> CropResult<()> {
        if self.removed {
            log::warn!("Operation on a removed crop engine");
            return Err(CropError::Detached);
        }
        Ok(())
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    pub fn get_constraint(&self) -> CropSquare {
        self.model.get()
    }

    /// Overwrite the given fields and schedule a repaint. Values are taken
    /// as-is; use [`CropSquare::check_bounds`] beforehand to validate input.
    pub fn set_constraint(
        &mut self,
        x: Option<f32>,
        y: Option<f32>,
        side: Option<f32>,
    ) -> CropResult<()> {
        self.ensure_live()?;
        self.model.set(x, y, side);
        self.scheduler.request();
        Ok(())
    }

    /// Shift by the given deltas (omitted deltas are zero) and schedule a
    /// repaint.
    pub fn move_constraint(
        &mut self,
        dx: Option<f32>,
        dy: Option<f32>,
        dside: Option<f32>,
    ) -> CropResult<()> {
        self.ensure_live()?;
        self.model.shift(dx, dy, dside);
        self.scheduler.request();
        Ok(())
    }

    /// Crop the current square out of the source image.
    pub fn export_image(&self) -> CropResult<ExportedImage> {
        self.ensure_live()?;
        export_square(&self.source, self.model.get())
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    /// Register a listener fired after every completed repaint. The listener
    /// gets the engine to read the new square from.
    pub fn on_constraint_change(
        &mut self,
        listener: impl FnMut(&CropEngine) + 'static,
    ) -> SubscriptionId {
        self.observers.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Feed one host event into the engine.
    pub fn update(&mut self, message: EngineMessage) -> CropResult<()> {
        self.ensure_live()?;

        match message {
            EngineMessage::PointerPressed { x, y } => self.enter_drag(x, y),
            EngineMessage::PointerMoved { x, y } => {
                if let Some(delta) = self.drag.drag_to(x, y) {
                    self.move_constraint(Some(delta.dx), Some(delta.dy), None)?;
                }
            }
            EngineMessage::PointerReleased | EngineMessage::Cancel => self.exit_drag(),
            EngineMessage::Frame => {
                self.on_frame();
            }
        }

        Ok(())
    }

    /// Whether the host should deliver a [`EngineMessage::Frame`].
    pub fn needs_frame(&self) -> bool {
        !self.removed && self.scheduler.is_pending()
    }

    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    fn enter_drag(&mut self, x: f32, y: f32) {
        let Some(attachment) = &self.attachment else {
            log::debug!("Ignoring press on a detached surface");
            return;
        };

        if self.drag.press(x, y) {
            let host = Rc::clone(&attachment.host);
            let (moved, released) = {
                let mut container = host.borrow_mut();
                (
                    container.add_listener(ListenerTarget::Document, PointerEvent::Move),
                    container.add_listener(ListenerTarget::Document, PointerEvent::Release),
                )
            };
            self.drag_listeners = Some(DragListeners {
                host,
                moved,
                released,
            });
            log::debug!("Drag started at ({x}, {y})");
        }
    }

    fn exit_drag(&mut self) {
        if self.drag.release() {
            log::debug!("Drag ended at {:?}", self.model.get());
        }

        if let Some(DragListeners {
            host,
            moved,
            released,
        }) = self.drag_listeners.take()
        {
            let mut container = host.borrow_mut();
            container.remove_listener(moved);
            container.remove_listener(released);
        }
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Run the pending repaint, if any, then notify listeners.
    /// Returns whether a repaint happened.
    fn on_frame(&mut self) -> bool {
        if !self.scheduler.take() {
            return false;
        }

        self.pipeline
            .redraw(&mut self.surface, &self.source, self.model.get());
        let mut observers = std::mem::take(&mut self.observers);
        observers.notify(self);
        self.observers = observers;
        true
    }

    /// Repaint unconditionally; used by hosts that render on demand.
    pub fn redraw(&mut self) -> CropResult<()> {
        self.ensure_live()?;
        self.scheduler.request();
        self.on_frame();
        Ok(())
    }

    pub fn surface(&self) -> &DrawingSurface {
        &self.surface
    }

    pub fn source(&self) -> &SourceImage {
        &self.source
    }

    /// Requests made and frames actually rendered.
    pub fn frame_stats(&self) -> (u64, u64) {
        self.scheduler.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::host::MemoryHost;
    use image::{Rgba, RgbaImage};
    use std::cell::Cell;

    fn engine(width: u32, height: u32) -> CropEngine {
        let img = RgbaImage::from_pixel(width, height, Rgba([90, 120, 150, 255]));
        let config = EngineConfig {
            load_system_fonts: false,
            ..EngineConfig::default()
        };
        CropEngine::new(SourceImage::from_rgba(img).unwrap(), config).unwrap()
    }

    #[test]
    fn starts_centered_with_pending_frame() {
        let engine = engine(400, 200);
        assert_eq!(engine.get_constraint(), CropSquare::new(125.0, 25.0, 150.0));
        assert!(engine.needs_frame());
    }

    #[test]
    fn mutations_coalesce_into_one_frame() {
        let mut engine = engine(100, 100);
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        engine.on_constraint_change(move |_| h.set(h.get() + 1));

        engine.set_constraint(Some(1.0), None, None).unwrap();
        engine.move_constraint(Some(2.0), Some(3.0), None).unwrap();
        engine.update(EngineMessage::Frame).unwrap();
        engine.update(EngineMessage::Frame).unwrap();

        assert_eq!(hits.get(), 1);
        assert_eq!(engine.frame_stats().1, 1);
    }

    #[test]
    fn frame_reads_model_lazily() {
        let mut engine = engine(100, 100);
        engine.update(EngineMessage::Frame).unwrap();

        engine.set_constraint(Some(0.0), Some(0.0), Some(50.0)).unwrap();
        engine.set_constraint(Some(10.0), None, None).unwrap();
        engine.update(EngineMessage::Frame).unwrap();
        let painted = engine.surface().pixmap().data().to_vec();

        engine.redraw().unwrap();
        assert_eq!(engine.surface().pixmap().data(), &painted[..]);
        assert_eq!(engine.get_constraint(), CropSquare::new(10.0, 0.0, 50.0));
    }

    #[test]
    fn press_is_ignored_until_attached() {
        let mut engine = engine(100, 100);
        engine
            .update(EngineMessage::PointerPressed { x: 1.0, y: 1.0 })
            .unwrap();
        assert_eq!(engine.drag_state(), DragState::Idle);
    }

    #[test]
    fn cancel_ends_drag_and_listeners() {
        let (host, handle) = MemoryHost::shared();
        let mut engine = engine(100, 100);
        engine.set_element(handle).unwrap();

        engine
            .update(EngineMessage::PointerPressed { x: 5.0, y: 5.0 })
            .unwrap();
        assert_eq!(host.borrow().listener_count(), 3);

        engine.update(EngineMessage::Cancel).unwrap();
        assert_eq!(engine.drag_state(), DragState::Idle);
        assert_eq!(host.borrow().listener_count(), 1);
    }

    #[test]
    fn moving_to_another_host_detaches_from_the_first() {
        let (first, first_handle) = MemoryHost::shared();
        let (second, second_handle) = MemoryHost::shared();
        let mut engine = engine(50, 50);

        engine.set_element(first_handle).unwrap();
        engine.set_element(second_handle).unwrap();

        assert!(first.borrow().children().is_empty());
        assert_eq!(first.borrow().listener_count(), 0);
        assert_eq!(second.borrow().children(), &[engine.surface().id()]);
        assert_eq!(second.borrow().listener_count(), 1);
    }

    #[test]
    fn remove_twice_is_reported() {
        let (_host, handle) = MemoryHost::shared();
        let mut engine = engine(10, 10);
        engine.set_element(handle).unwrap();

        engine.remove().unwrap();
        assert_eq!(engine.remove(), Err(CropError::Detached));
        assert!(!engine.needs_frame());
    }
}
