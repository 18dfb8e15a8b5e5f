//! Browser surfaces backed by `<canvas>` elements.

use super::{PointerSink, Surface, SurfaceError, SurfaceHost, SurfaceResult};
use crate::draw::{DrawingContext, css_color};
use crate::input::{Modifiers, MouseButton, PointerEvent, PointerEventKind};
use kurbo::{Circle, Line, Point, Rect, Size};
use peniko::Color;
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, MouseEvent};

/// Looks surfaces up in the page's document.
#[derive(Debug, Clone)]
pub struct WebSurfaceHost {
    document: Document,
}

impl WebSurfaceHost {
    /// Host over the current window's document.
    pub fn new() -> SurfaceResult<Self> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| SurfaceError::Other("No document available".to_string()))?;
        Ok(Self { document })
    }
}

impl SurfaceHost for WebSurfaceHost {
    type Surface = WebSurface;

    fn surface(&self, id: &str) -> Option<WebSurface> {
        self.document.get_element_by_id(id).map(|element| WebSurface {
            id: id.to_string(),
            element,
        })
    }
}

/// A DOM element looked up by id.
#[derive(Debug, Clone)]
pub struct WebSurface {
    id: String,
    element: Element,
}

impl WebSurface {
    pub fn element(&self) -> &Element {
        &self.element
    }
}

impl Surface for WebSurface {
    type Context = WebContext;
    type Listeners = WebListeners;

    fn id(&self) -> &str {
        &self.id
    }

    fn context_2d(&self) -> SurfaceResult<Option<WebContext>> {
        let Some(canvas) = self.element.dyn_ref::<HtmlCanvasElement>() else {
            return Ok(None);
        };
        let context: Option<js_sys::Object> = canvas
            .get_context("2d")
            .map_err(|e| SurfaceError::Other(format!("getContext failed: {:?}", e)))?;
        Ok(context
            .and_then(|object| object.dyn_into::<CanvasRenderingContext2d>().ok())
            .map(|context| WebContext {
                canvas: canvas.clone(),
                context,
            }))
    }

    fn attach_pointer_listeners(&self, sink: PointerSink) -> SurfaceResult<WebListeners> {
        let mut listeners = WebListeners {
            element: self.element.clone(),
            closures: Vec::with_capacity(PointerEventKind::DOM_EVENTS.len()),
        };

        for (name, kind) in PointerEventKind::DOM_EVENTS {
            let sink = sink.clone();
            let closure = Closure::wrap(Box::new(move |e: MouseEvent| {
                sink(pointer_event(kind, &e));
            }) as Box<dyn FnMut(MouseEvent)>);

            self.element
                .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
                .map_err(|e| SurfaceError::Listener(format!("{}: {:?}", name, e)))?;
            // Pushed only once attached so Drop removes exactly what was added.
            listeners.closures.push((name, closure));
        }

        Ok(listeners)
    }

    fn client_origin(&self) -> Option<Point> {
        let rect = self.element.get_bounding_client_rect();
        Some(Point::new(rect.left(), rect.top()))
    }
}

fn pointer_event(kind: PointerEventKind, e: &MouseEvent) -> PointerEvent {
    let mut event = PointerEvent::new(
        kind,
        Point::new(f64::from(e.client_x()), f64::from(e.client_y())),
    )
    .with_modifiers(Modifiers {
        shift: e.shift_key(),
        ctrl: e.ctrl_key(),
        alt: e.alt_key(),
        meta: e.meta_key(),
    });
    if matches!(kind, PointerEventKind::Down | PointerEventKind::Up) {
        event.button = MouseButton::from_dom(e.button());
    }
    event
}

/// Registered DOM listeners. Removed from the element when dropped.
pub struct WebListeners {
    element: Element,
    // Store closures to prevent them from being dropped
    closures: Vec<(&'static str, Closure<dyn FnMut(MouseEvent)>)>,
}

impl Drop for WebListeners {
    fn drop(&mut self) {
        for (name, closure) in self.closures.drain(..) {
            if let Err(e) = self
                .element
                .remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
            {
                log::warn!("Failed to remove {} listener: {:?}", name, e);
            }
        }
    }
}

/// Canvas 2D context wrapper.
#[derive(Debug, Clone)]
pub struct WebContext {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl DrawingContext for WebContext {
    fn size(&self) -> Size {
        Size::new(f64::from(self.canvas.width()), f64::from(self.canvas.height()))
    }

    fn clear(&mut self, rect: Rect) {
        self.context.clear_rect(rect.x0, rect.y0, rect.width(), rect.height());
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.context.set_fill_style_str(&css_color(color));
        self.context.fill_rect(rect.x0, rect.y0, rect.width(), rect.height());
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64) {
        self.context.set_stroke_style_str(&css_color(color));
        self.context.set_line_width(width);
        self.context.stroke_rect(rect.x0, rect.y0, rect.width(), rect.height());
    }

    fn fill_circle(&mut self, circle: Circle, color: Color) {
        self.context.set_fill_style_str(&css_color(color));
        self.context.begin_path();
        if let Err(e) = self
            .context
            .arc(circle.center.x, circle.center.y, circle.radius, 0.0, TAU)
        {
            log::warn!("arc failed: {:?}", e);
            return;
        }
        self.context.fill();
    }

    fn stroke_line(&mut self, line: Line, color: Color, width: f64) {
        self.context.set_stroke_style_str(&css_color(color));
        self.context.set_line_width(width);
        self.context.begin_path();
        self.context.move_to(line.p0.x, line.p0.y);
        self.context.line_to(line.p1.x, line.p1.y);
        self.context.stroke();
    }

    fn fill_text(&mut self, text: &str, origin: Point, color: Color) {
        self.context.set_fill_style_str(&css_color(color));
        if let Err(e) = self.context.fill_text(text, origin.x, origin.y) {
            log::warn!("fill_text failed: {:?}", e);
        }
    }
}
