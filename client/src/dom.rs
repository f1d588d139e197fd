use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Event, EventTarget, HtmlButtonElement, HtmlCanvasElement, HtmlElement,
    HtmlInputElement, HtmlTextAreaElement,
};

use sigstamp_shared::{to_local, Point, PointerEvent, PointerPhase, StampFields, StampLayout};

pub fn get_element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    let element = document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Missing element: {id}")))?;
    element
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("Invalid element type: {id}")))
}

pub fn on(
    target: &EventTarget,
    kind: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

pub fn set_enabled(button: &HtmlButtonElement, enabled: bool) {
    button.set_disabled(!enabled);
}

pub fn set_tab_button(button: &HtmlButtonElement, active: bool) {
    let pressed = if active { "true" } else { "false" };
    let _ = button.set_attribute("aria-pressed", pressed);
}

pub fn set_hidden(element: &HtmlElement, hidden: bool) {
    element.set_hidden(hidden);
}

/// Matches the backing store to the laid-out size of the canvas.
pub fn fit_canvas_to_container(canvas: &HtmlCanvasElement) {
    let width = canvas.offset_width().max(1) as u32;
    let height = canvas.offset_height().max(1) as u32;
    canvas.set_width(width);
    canvas.set_height(height);
    log::debug!("canvas {} sized to {width}x{height}", canvas.id());
}

pub fn client_to_canvas(
    canvas: &HtmlCanvasElement,
    client_x: f64,
    client_y: f64,
) -> Option<Point> {
    let rect = canvas.get_bounding_client_rect();
    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return None;
    }
    to_local(
        Point::new(client_x as f32, client_y as f32),
        Point::new(rect.left() as f32, rect.top() as f32),
    )
}

fn pointer_phase(kind: &str) -> Option<PointerPhase> {
    match kind {
        "pointerdown" => Some(PointerPhase::Down),
        "pointermove" => Some(PointerPhase::Move),
        "pointerup" => Some(PointerPhase::Up),
        "pointerleave" | "pointercancel" => Some(PointerPhase::Leave),
        _ => None,
    }
}

/// Normalizes a DOM pointer event. Secondary touch contacts are dropped so
/// touch input follows the first finger only.
pub fn event_to_pointer(canvas: &HtmlCanvasElement, event: &Event) -> Option<PointerEvent> {
    let event = event.dyn_ref::<web_sys::PointerEvent>()?;
    if !event.is_primary() {
        return None;
    }
    let phase = pointer_phase(&event.type_())?;
    let point = client_to_canvas(canvas, event.client_x() as f64, event.client_y() as f64)?;
    Some(PointerEvent::new(point, phase))
}

pub fn event_to_point(canvas: &HtmlCanvasElement, event: &Event) -> Option<Point> {
    let event = event.dyn_ref::<web_sys::MouseEvent>()?;
    client_to_canvas(canvas, event.client_x() as f64, event.client_y() as f64)
}

/// Reads layout overrides from the canvas `data-layout` attribute.
pub fn read_layout(canvas: &HtmlCanvasElement) -> StampLayout {
    let Some(json) = canvas.get_attribute("data-layout") else {
        return StampLayout::default();
    };
    match serde_json::from_str::<StampLayout>(&json) {
        Ok(layout) => layout,
        Err(error) => {
            log::warn!("ignoring data-layout on {}: {error}", canvas.id());
            StampLayout::default()
        }
    }
}

pub struct FieldInputs {
    pub name: HtmlInputElement,
    pub number: HtmlInputElement,
    pub description: HtmlTextAreaElement,
}

impl FieldInputs {
    pub fn find(document: &Document, prefix: &str) -> Result<Self, JsValue> {
        Ok(Self {
            name: get_element(document, &format!("{prefix}Name"))?,
            number: get_element(document, &format!("{prefix}Number"))?,
            description: get_element(document, &format!("{prefix}Description"))?,
        })
    }

    pub fn read(&self) -> StampFields {
        StampFields::new(
            self.name.value(),
            self.number.value(),
            self.description.value(),
        )
    }
}
