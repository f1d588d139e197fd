use std::cell::{Cell, RefCell};
use std::rc::Rc;

use js_sys::Reflect;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, HtmlButtonElement, HtmlCanvasElement, HtmlElement};

use sigstamp_shared::{Composite, SignaturePad, StampPad, StrokeStyle};

use crate::canvas::CanvasSurface;
use crate::dom::{
    event_to_point, event_to_pointer, fit_canvas_to_container, get_element, on, read_layout,
    set_enabled, set_hidden, set_tab_button, FieldInputs,
};
use crate::download::offer;
use crate::state::{State, Tab};

const POINTER_EVENTS: [&str; 5] = [
    "pointerdown",
    "pointermove",
    "pointerup",
    "pointerleave",
    "pointercancel",
];

fn debug_enabled(window: &web_sys::Window) -> bool {
    let search = window.location().search().ok().unwrap_or_default();
    search.contains("debug=1")
        || search.contains("debug=true")
        || search.contains("log=1")
        || search.contains("log=true")
}

fn document_ready_state(document: &Document) -> Option<String> {
    Reflect::get(document.as_ref(), &JsValue::from_str("readyState"))
        .ok()?
        .as_string()
}

fn init_logging(window: &web_sys::Window) {
    let level = if debug_enabled(window) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    if console_log::init_with_level(level).is_err() {
        web_sys::console::warn_1(&"Logger already installed".into());
    }
}

/// Surfaces that fail to open leave their pad detached; every action on
/// that pad is then a no-op.
fn open_surface(canvas: &HtmlCanvasElement) -> Option<CanvasSurface> {
    match CanvasSurface::new(canvas.clone()) {
        Ok(surface) => Some(surface),
        Err(error) => {
            log::warn!("canvas {} unavailable: {error}", canvas.id());
            None
        }
    }
}

#[wasm_bindgen(start)]
pub fn run() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;
    let started = Rc::new(Cell::new(false));

    if document_ready_state(&document).as_deref() == Some("complete") {
        started.set(true);
        return start_app();
    }

    let onload_started = started.clone();
    let onload = Closure::<dyn FnMut(Event)>::new(move |_| {
        if onload_started.replace(true) {
            return;
        }
        if let Err(err) = start_app() {
            web_sys::console::error_1(&err);
        }
    });
    window.add_event_listener_with_callback("load", onload.as_ref().unchecked_ref())?;
    onload.forget();

    Ok(())
}

fn start_app() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    init_logging(&window);
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;

    let signature_canvas: HtmlCanvasElement = get_element(&document, "signatureCanvas")?;
    let stamp_canvas: HtmlCanvasElement = get_element(&document, "stampCanvas")?;
    let combo_canvas: HtmlCanvasElement = get_element(&document, "comboCanvas")?;

    fit_canvas_to_container(&signature_canvas);

    let mut signature = SignaturePad::new(StrokeStyle::default());
    let mut stamp = StampPad::new(read_layout(&stamp_canvas));
    let mut composite = Composite::new(read_layout(&combo_canvas), StrokeStyle::default());
    if let Some(surface) = open_surface(&signature_canvas) {
        signature.attach(surface);
    }
    if let Some(surface) = open_surface(&stamp_canvas) {
        stamp.attach(surface);
    }
    if let Some(surface) = open_surface(&combo_canvas) {
        composite.attach(surface);
    }

    let state = Rc::new(RefCell::new(State {
        tab: Tab::Signature,
        signature,
        stamp,
        composite,
    }));

    wire_tabs(&document, &state)?;
    wire_signature(&document, &state, &signature_canvas)?;
    wire_stamp(&document, &state)?;
    wire_composite(&document, &state, &combo_canvas)?;

    log::info!("sigstamp ready");
    Ok(())
}

fn show_tab(document: &Document, tab: Tab) {
    for candidate in Tab::ALL {
        let active = candidate == tab;
        if let Ok(button) = get_element::<HtmlButtonElement>(document, candidate.button_id()) {
            set_tab_button(&button, active);
        }
        if let Ok(panel) = get_element::<HtmlElement>(document, candidate.panel_id()) {
            set_hidden(&panel, !active);
        }
    }
}

fn wire_tabs(document: &Document, state: &Rc<RefCell<State>>) -> Result<(), JsValue> {
    show_tab(document, state.borrow().tab);
    for tab in Tab::ALL {
        let button: HtmlButtonElement = get_element(document, tab.button_id())?;
        let tab_state = state.clone();
        let document = document.clone();
        on(&button, "click", move |_| {
            let mut state = tab_state.borrow_mut();
            if state.tab == tab {
                return;
            }
            log::debug!("tab {:?} -> {:?}", state.tab, tab);
            state.tab = tab;
            show_tab(&document, tab);
        })?;
    }
    Ok(())
}

fn wire_signature(
    document: &Document,
    state: &Rc<RefCell<State>>,
    canvas: &HtmlCanvasElement,
) -> Result<(), JsValue> {
    let clear_button: HtmlButtonElement = get_element(document, "signatureClear")?;
    let download_button: HtmlButtonElement = get_element(document, "signatureDownload")?;

    for kind in POINTER_EVENTS {
        let pointer_state = state.clone();
        let canvas_cb = canvas.clone();
        on(canvas, kind, move |event: Event| {
            let Some(pointer) = event_to_pointer(&canvas_cb, &event) else {
                return;
            };
            if pointer_state.borrow_mut().signature.pointer(pointer) {
                event.prevent_default();
            }
        })?;
    }

    {
        let clear_state = state.clone();
        on(&clear_button, "click", move |_| {
            clear_state.borrow_mut().signature.clear();
        })?;
    }

    {
        let download_state = state.clone();
        let document = document.clone();
        on(&download_button, "click", move |_| {
            let result = download_state.borrow().signature.download();
            offer(&document, result);
        })?;
    }

    Ok(())
}

fn wire_stamp(document: &Document, state: &Rc<RefCell<State>>) -> Result<(), JsValue> {
    let inputs = FieldInputs::find(document, "stamp")?;
    let generate_button: HtmlButtonElement = get_element(document, "stampGenerate")?;
    let download_button: HtmlButtonElement = get_element(document, "stampDownload")?;

    {
        let generate_state = state.clone();
        on(&generate_button, "click", move |_| {
            let mut state = generate_state.borrow_mut();
            *state.stamp.fields_mut() = inputs.read();
            state.stamp.generate();
        })?;
    }

    {
        let download_state = state.clone();
        let document = document.clone();
        on(&download_button, "click", move |_| {
            let result = download_state.borrow().stamp.download();
            offer(&document, result);
        })?;
    }

    Ok(())
}

fn sync_composite_controls(
    composite: &Composite<CanvasSurface>,
    clear_button: &HtmlButtonElement,
    download_button: &HtmlButtonElement,
) {
    let enabled = composite.can_export();
    set_enabled(clear_button, enabled);
    set_enabled(download_button, enabled);
}

fn wire_composite(
    document: &Document,
    state: &Rc<RefCell<State>>,
    canvas: &HtmlCanvasElement,
) -> Result<(), JsValue> {
    let inputs = Rc::new(FieldInputs::find(document, "combo")?);
    let generate_button: HtmlButtonElement = get_element(document, "comboGenerate")?;
    let clear_button: HtmlButtonElement = get_element(document, "comboClear")?;
    let download_button: HtmlButtonElement = get_element(document, "comboDownload")?;

    let _ = canvas.style().set_property("cursor", "crosshair");
    sync_composite_controls(&state.borrow().composite, &clear_button, &download_button);

    {
        let generate_state = state.clone();
        let inputs = inputs.clone();
        let clear_button = clear_button.clone();
        let download_button = download_button.clone();
        on(&generate_button, "click", move |_| {
            let mut state = generate_state.borrow_mut();
            *state.composite.fields_mut() = inputs.read();
            state.composite.generate();
            sync_composite_controls(&state.composite, &clear_button, &download_button);
        })?;
    }

    {
        let click_state = state.clone();
        let canvas_cb = canvas.clone();
        on(canvas, "click", move |event: Event| {
            let Some(point) = event_to_point(&canvas_cb, &event) else {
                return;
            };
            click_state.borrow_mut().composite.activate(point);
        })?;
    }

    for kind in POINTER_EVENTS {
        let pointer_state = state.clone();
        let canvas_cb = canvas.clone();
        on(canvas, kind, move |event: Event| {
            let Some(pointer) = event_to_pointer(&canvas_cb, &event) else {
                return;
            };
            if pointer_state.borrow_mut().composite.pointer(pointer) {
                event.prevent_default();
            }
        })?;
    }

    {
        let clear_state = state.clone();
        let inputs = inputs.clone();
        let clear_button_cb = clear_button.clone();
        let download_button = download_button.clone();
        on(&clear_button, "click", move |_| {
            let mut state = clear_state.borrow_mut();
            *state.composite.fields_mut() = inputs.read();
            state.composite.clear();
            sync_composite_controls(&state.composite, &clear_button_cb, &download_button);
        })?;
    }

    {
        let download_state = state.clone();
        let document = document.clone();
        on(&download_button, "click", move |_| {
            let result = download_state.borrow().composite.download();
            offer(&document, result);
        })?;
    }

    Ok(())
}
