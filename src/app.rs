// filepath: src/app.rs
//! Main application logic for hypr-clock

use crate::config::ClockConfig;
use crate::draw::Canvas;
use crate::frame::{FrameScheduler, Wake};
use crate::widget::{PixelSize, Widget};
use log::{debug, error, info, warn};
use smithay_client_toolkit::{
    output::OutputState,
    registry::RegistryState,
    shell::{
        wlr_layer::{Anchor, KeyboardInteractivity, Layer, LayerSurface},
        WaylandSurface,
    },
    shm::{slot::SlotPool, Shm},
};
use wayland_client::protocol::wl_shm;
use wayland_client::QueueHandle;

pub struct AppData {
    registry_state: RegistryState,
    output_state: OutputState,
    shm_state: Shm,
    layer_surface: Option<LayerSurface>,
    pool: SlotPool,
    widget: Box<dyn Widget>,
    frames: FrameScheduler,
    /// Logical size from the last configure
    width: u32,
    height: u32,
    /// Integer buffer scale of the output the surface is on
    scale: i32,
    configured: bool,
    attached: bool,
    exit: bool,
}

impl AppData {
    pub fn new(
        registry_state: RegistryState,
        output_state: OutputState,
        shm_state: Shm,
        layer_surface: LayerSurface,
        pool: SlotPool,
        config: &ClockConfig,
        widget: Box<dyn Widget>,
    ) -> Self {
        info!("Configuring layer surface");
        let [top, right, bottom, left] = config.margin;
        layer_surface.set_anchor(parse_anchor(&config.anchor));
        layer_surface.set_keyboard_interactivity(KeyboardInteractivity::None);
        layer_surface.set_size(config.width, config.height);
        layer_surface.set_margin(top, right, bottom, left);
        info!("Committing layer surface configuration");
        layer_surface.wl_surface().commit();

        Self {
            registry_state,
            output_state,
            shm_state,
            layer_surface: Some(layer_surface),
            pool,
            widget,
            frames: FrameScheduler::new(),
            width: config.width,
            height: config.height,
            scale: 1,
            configured: false,
            attached: false,
            exit: false,
        }
    }

    pub fn should_exit(&self) -> bool {
        self.exit
    }

    pub fn pixel_size(&self) -> PixelSize {
        PixelSize::from_logical(self.width, self.height, f64::from(self.scale))
    }

    /// The compositor assigned a (possibly new) logical size
    pub fn handle_configure(&mut self, qh: &QueueHandle<Self>, new_size: (u32, u32)) {
        if new_size.0 != 0 {
            self.width = new_size.0;
        }
        if new_size.1 != 0 {
            self.height = new_size.1;
        }
        self.configured = true;

        let size = self.pixel_size();
        if !self.attached {
            info!(
                "Attaching {} at {}x{} pixels",
                self.widget.name(),
                size.width,
                size.height
            );
            self.widget.attach(size);
            self.attached = true;
        } else {
            self.widget.refresh(size);
        }
        self.present_or_exit(qh, Wake::Configure);

        info!("Surface now configured with size: {}x{}", self.width, self.height);
    }

    /// The surface moved to an output with a different buffer scale
    pub fn handle_scale_change(&mut self, qh: &QueueHandle<Self>, factor: i32) {
        if factor < 1 || factor == self.scale {
            return;
        }
        info!("Buffer scale changed from {} to {}", self.scale, factor);
        self.scale = factor;
        if let Some(layer_surface) = &self.layer_surface {
            layer_surface.wl_surface().set_buffer_scale(factor);
        }
        if self.attached {
            self.widget.refresh(self.pixel_size());
            self.present_or_exit(qh, Wake::Rescale);
        }
    }

    /// A requested frame callback fired
    pub fn handle_frame(&mut self, qh: &QueueHandle<Self>) {
        if !self.attached {
            self.frames.complete();
            return;
        }
        self.widget.refresh(self.pixel_size());
        self.present_or_exit(qh, Wake::Frame);
    }

    fn present_or_exit(&mut self, qh: &QueueHandle<Self>, wake: Wake) {
        if let Err(e) = self.present(qh, wake) {
            error!("Failed to present frame: {}", e);
            self.exit = true;
        }
    }

    /// Composite the widget into a fresh shm buffer and commit it
    pub fn present(
        &mut self,
        qh: &QueueHandle<Self>,
        wake: Wake,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if !self.configured {
            if wake == Wake::Frame {
                self.frames.complete();
            }
            debug!("present() called before surface is configured, skipping");
            return Ok(());
        }
        let Some(layer_surface) = &self.layer_surface else {
            return Err("layer surface is gone".into());
        };
        let size = self.pixel_size();
        if size.is_empty() {
            if wake == Wake::Frame {
                self.frames.complete();
            }
            debug!("present() called with an empty surface, skipping");
            return Ok(());
        }

        let surface = layer_surface.wl_surface();
        if self.frames.on_present(wake, self.widget.animates()) {
            surface.frame(qh, surface.clone());
        }

        let (buffer, pixels) = self.pool.create_buffer(
            size.width as i32,
            size.height as i32,
            size.stride() as i32,
            wl_shm::Format::Argb8888,
        )?;

        let mut canvas = Canvas::new(pixels, size.width, size.height);
        canvas.clear();
        self.widget.compose(&mut canvas);

        buffer
            .attach_to(surface)
            .map_err(|e| format!("failed to attach buffer: {e:?}"))?;
        surface.damage_buffer(0, 0, size.width as i32, size.height as i32);
        surface.commit();

        let stats = self.widget.stats();
        debug!(
            "Presented {}x{} (face redraws {}, hand redraws {})",
            size.width, size.height, stats.face_redraws, stats.hand_redraws
        );
        Ok(())
    }

    pub fn registry_state(&mut self) -> &mut RegistryState {
        &mut self.registry_state
    }

    pub fn output_state(&mut self) -> &mut OutputState {
        &mut self.output_state
    }

    pub fn shm_state(&mut self) -> &mut Shm {
        &mut self.shm_state
    }

    pub fn close_layer_surface(&mut self) {
        self.layer_surface = None;
        self.exit = true;
        info!("Layer surface closed");
    }
}

/// Layer from its config name; unknown names fall back to `top`
pub fn parse_layer(name: &str) -> Layer {
    match name.to_ascii_lowercase().as_str() {
        "background" => Layer::Background,
        "bottom" => Layer::Bottom,
        "top" => Layer::Top,
        "overlay" => Layer::Overlay,
        other => {
            warn!("Unknown layer '{}', using top", other);
            Layer::Top
        }
    }
}

/// Combined anchor from a list of edge names; unknown names are ignored
pub fn parse_anchor(edges: &[String]) -> Anchor {
    let mut anchor = Anchor::empty();
    for edge in edges {
        match edge.to_ascii_lowercase().as_str() {
            "top" => anchor |= Anchor::TOP,
            "bottom" => anchor |= Anchor::BOTTOM,
            "left" => anchor |= Anchor::LEFT,
            "right" => anchor |= Anchor::RIGHT,
            other => warn!("Unknown anchor edge '{}'", other),
        }
    }
    anchor
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn layers_parse_by_name() {
        assert_eq!(parse_layer("overlay"), Layer::Overlay);
        assert_eq!(parse_layer("Background"), Layer::Background);
        assert_eq!(parse_layer("bottom"), Layer::Bottom);
        assert_eq!(parse_layer("sideways"), Layer::Top);
    }

    #[test]
    fn anchors_combine() {
        let edges = ["top", "RIGHT", "middle"].map(String::from);
        assert_eq!(parse_anchor(&edges), Anchor::TOP | Anchor::RIGHT);
        assert_eq!(parse_anchor(&[]), Anchor::empty());
    }
}
