/// Browser surface for the fellowship landing page
///
/// The host page provides elements with the ids in [`ids`] and constructs a
/// [`WebHero`], which drives itself from `requestAnimationFrame` until
/// [`WebHero::unmount`]. The tower is drawn as shaded text into a `<pre>`, the
/// same raster the terminal build uses.

use hero_core::content::{DetailBlock, BACKED_BY, CTA_LABEL, SWAP_GLYPH_INDEX, TAGLINE};
use hero_core::{
    AsciiRaster, Camera, HeroError, LinkOpener, MotionPreference, PageRoot, HERO_LIGHTS,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Window};

const RASTER_COLS: usize = 72;
const RASTER_ROWS: usize = 36;
/// Glyph cells in a monospace `<pre>` are about twice as tall as wide
const CELL_ASPECT: f32 = 2.0;

pub mod ids {
    pub const WORDMARK: &str = "hero-wordmark";
    pub const TOWER: &str = "hero-tower";
    pub const TAGLINE: &str = "hero-tagline";
    pub const HEADLINE: &str = "hero-headline";
    pub const TERMINAL: [&str; 2] = ["hero-terminal-0", "hero-terminal-1"];
    pub const BACKED_BY: &str = "hero-backed-by";
    pub const BACKERS: &str = "hero-backers";
    pub const CTA: &str = "hero-cta";
    pub const DETAILS: &str = "hero-details";

    pub const ALL: [&str; 10] = [
        WORDMARK, TOWER, TAGLINE, HEADLINE, TERMINAL[0], TERMINAL[1], BACKED_BY, BACKERS, CTA,
        DETAILS,
    ];

    /// Class of the wordmark letter that swaps with the tower icon
    pub const GLYPH_CLASS: &str = "hero-glyph";
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// A place on the page that copy is written into
pub trait Region {
    fn set_text(&self, text: &str);
    fn set_html(&self, html: &str);
}

impl Region for Element {
    fn set_text(&self, text: &str) {
        self.set_text_content(Some(text));
    }

    fn set_html(&self, html: &str) {
        self.set_inner_html(html);
    }
}

/// Page regions, looked up once at mount. A missing one stays empty.
struct Regions<R> {
    wordmark: Option<R>,
    tower: Option<R>,
    tagline: Option<R>,
    headline: Option<R>,
    terminal: [Option<R>; 2],
    backed_by: Option<R>,
    backers: Option<R>,
    cta: Option<R>,
    details: Option<R>,
}

impl<R: Region> Regions<R> {
    fn resolve(mut lookup: impl FnMut(&str) -> Option<R>) -> Self {
        let mut find = |id: &str| {
            let region = lookup(id);
            if region.is_none() {
                log::warn!("no element with id `{id}`, leaving that region empty");
            }
            region
        };
        Self {
            wordmark: find(ids::WORDMARK),
            tower: find(ids::TOWER),
            tagline: find(ids::TAGLINE),
            headline: find(ids::HEADLINE),
            terminal: [find(ids::TERMINAL[0]), find(ids::TERMINAL[1])],
            backed_by: find(ids::BACKED_BY),
            backers: find(ids::BACKERS),
            cta: find(ids::CTA),
            details: find(ids::DETAILS),
        }
    }
}

fn put_text<R: Region>(region: &Option<R>, text: &str) {
    if let Some(region) = region {
        region.set_text(text);
    }
}

/// Page state plus the regions it draws into
struct Surface<R> {
    page: PageRoot,
    regions: Regions<R>,
    /// `None` when there is nowhere to show the tower
    raster: Option<AsciiRaster>,
    camera: Camera,
    last_frame_ms: Option<f64>,
}

impl<R: Region> Surface<R> {
    fn mount(motion: MotionPreference, regions: Regions<R>) -> Result<Self, HeroError> {
        let page = PageRoot::mount(motion)?;
        let raster = regions
            .tower
            .is_some()
            .then(|| AsciiRaster::new(RASTER_COLS, RASTER_ROWS));
        let surface = Self {
            page,
            regions,
            raster,
            camera: Camera::hero(RASTER_COLS as f32 / (RASTER_ROWS as f32 * CELL_ASPECT)),
            last_frame_ms: None,
        };
        surface.draw_static();
        Ok(surface)
    }

    /// Copy that never changes after mount
    fn draw_static(&self) {
        put_text(&self.regions.tagline, TAGLINE);
        put_text(&self.regions.backed_by, BACKED_BY);
        put_text(&self.regions.cta, CTA_LABEL);
        if let Some(details) = &self.regions.details {
            details.set_html(&details_html(self.page.details.blocks()));
        }
    }

    /// Advance all animations to `now_ms` and redraw the dynamic parts
    fn frame(&mut self, now_ms: f64) {
        let elapsed = frame_delta(self.last_frame_ms, now_ms);
        self.last_frame_ms = Some(now_ms);
        self.page.update(elapsed);

        let hero = &self.page.hero;
        if let (Some(region), Some(raster)) = (&self.regions.tower, &mut self.raster) {
            let tower = hero.tower();
            raster.clear();
            raster.render_mesh(tower.mesh(), &tower.model_matrix(), &self.camera, &HERO_LIGHTS);
            region.set_text(&raster.to_text());
        }

        if let Some(wordmark) = &self.regions.wordmark {
            wordmark.set_html(&wordmark_html(hero.wordmark()));
        }
        put_text(&self.regions.headline, hero.headline_word());
        for (i, region) in self.regions.terminal.iter().enumerate() {
            put_text(region, hero.terminal_line(i));
        }
        put_text(&self.regions.backers, &hero.backers().join(" · "));
    }
}

/// Source of animation frames
trait FrameScheduler {
    type Callback;

    /// Ask for `callback` to run on the next frame; returns the request handle
    fn request(&self, callback: &Self::Callback) -> Option<i32>;
    fn cancel(&self, handle: i32);
}

/// `window.requestAnimationFrame`
struct BrowserFrames;

impl FrameScheduler for BrowserFrames {
    type Callback = Closure<dyn FnMut(f64)>;

    fn request(&self, callback: &Self::Callback) -> Option<i32> {
        let window = web_sys::window()?;
        window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .inspect_err(|e| log::warn!("requestAnimationFrame failed: {e:?}"))
            .ok()
    }

    fn cancel(&self, handle: i32) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.cancel_animation_frame(handle) {
            log::warn!("cancelAnimationFrame failed: {e:?}");
        }
    }
}

/// A self-rescheduling frame callback and its pending request.
///
/// Stopping (or dropping) cancels the pending request and drops the callback,
/// so no frame runs afterwards.
struct FrameLoop<S: FrameScheduler> {
    scheduler: S,
    handle: Cell<Option<i32>>,
    callback: RefCell<Option<S::Callback>>,
}

impl<S: FrameScheduler> FrameLoop<S> {
    fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            handle: Cell::new(None),
            callback: RefCell::new(None),
        }
    }

    fn start(&self, callback: S::Callback) {
        *self.callback.borrow_mut() = Some(callback);
        self.request();
    }

    /// Schedule the callback for the next frame; does nothing once stopped
    fn request(&self) {
        let handle = match self.callback.borrow().as_ref() {
            Some(callback) => self.scheduler.request(callback),
            None => None,
        };
        self.handle.set(handle);
    }

    fn is_running(&self) -> bool {
        self.handle.get().is_some()
    }

    fn stop(&self) {
        if let Some(handle) = self.handle.take() {
            self.scheduler.cancel(handle);
        }
        self.callback.borrow_mut().take();
    }
}

impl<S: FrameScheduler> Drop for FrameLoop<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Opens links with `window.open(url, "_blank")`
struct WindowOpener<'a> {
    window: &'a Window,
}

impl LinkOpener for WindowOpener<'_> {
    type Error = String;

    fn open_in_new_context(&mut self, url: &str) -> Result<(), String> {
        match self.window.open_with_url_and_target(url, "_blank") {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err("popup blocked".to_string()),
            Err(e) => Err(format!("{e:?}")),
        }
    }
}

/// The page mounted into the document
#[wasm_bindgen]
pub struct WebHero {
    surface: Rc<RefCell<Surface<Element>>>,
    frames: Rc<FrameLoop<BrowserFrames>>,
}

#[wasm_bindgen]
impl WebHero {
    /// Mount the page and start its frame loop. Reads
    /// `(prefers-reduced-motion: reduce)` once.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WebHero, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let reduced = window
            .match_media("(prefers-reduced-motion: reduce)")
            .ok()
            .flatten()
            .is_some_and(|query| query.matches());

        let regions = Regions::resolve(|id| document.get_element_by_id(id));
        let surface = Surface::mount(MotionPreference { reduced }, regions)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let surface = Rc::new(RefCell::new(surface));
        let frames = Rc::new(FrameLoop::new(BrowserFrames));

        let callback = {
            let surface = Rc::downgrade(&surface);
            let frames = Rc::downgrade(&frames);
            Closure::<dyn FnMut(f64)>::new(move |now_ms: f64| {
                let (Some(surface), Some(frames)) = (surface.upgrade(), frames.upgrade()) else {
                    return;
                };
                surface.borrow_mut().frame(now_ms);
                frames.request();
            })
        };
        frames.start(callback);
        log::debug!("mounted web hero, reduced motion: {reduced}");

        Ok(Self { surface, frames })
    }

    pub fn pointer_down(&self, x: f32, y: f32) {
        self.surface.borrow_mut().page.hero.pointer_down(x, y);
    }

    pub fn pointer_move(&self, x: f32, y: f32) {
        self.surface.borrow_mut().page.hero.pointer_move(x, y);
    }

    pub fn pointer_up(&self) {
        self.surface.borrow_mut().page.hero.pointer_up();
    }

    pub fn set_backers_hovered(&self, hovered: bool) {
        self.surface.borrow_mut().page.hero.set_backers_hovered(hovered);
    }

    /// Open the application page in a new tab. Returns whether it opened.
    pub fn open_cta(&self) -> bool {
        let Some(window) = web_sys::window() else {
            return false;
        };
        let surface = self.surface.borrow();
        surface
            .page
            .hero
            .activate_cta(&mut WindowOpener { window: &window })
            .is_ok()
    }

    pub fn is_running(&self) -> bool {
        self.frames.is_running()
    }

    /// Stop the frame loop and drop the page; nothing runs afterwards
    pub fn unmount(self) {
        let Self { surface, frames } = self;
        frames.stop();
        drop(frames);
        match Rc::try_unwrap(surface) {
            Ok(surface) => surface.into_inner().page.unmount(),
            Err(_) => log::warn!("page still borrowed at unmount"),
        }
    }
}

/// Time since the previous frame; the first frame and clock jumps backwards count as zero
fn frame_delta(last_ms: Option<f64>, now_ms: f64) -> Duration {
    let delta = last_ms.map_or(0.0, |last| now_ms - last);
    if delta.is_finite() && delta > 0.0 {
        Duration::from_secs_f64(delta / 1000.0)
    } else {
        Duration::ZERO
    }
}

/// Wordmark with the swappable letter in its own span so it can take hover styles
fn wordmark_html(letters: impl Iterator<Item = char>) -> String {
    let mut html = String::new();
    let mut buf = [0; 4];
    for (i, c) in letters.enumerate() {
        let letter = escape(c.encode_utf8(&mut buf));
        if i == SWAP_GLYPH_INDEX {
            html.push_str(&format!("<span class=\"{}\">{letter}</span>", ids::GLYPH_CLASS));
        } else {
            html.push_str(&letter);
        }
    }
    html
}

fn details_html(blocks: &[DetailBlock]) -> String {
    let mut html = String::new();
    for block in blocks {
        html.push_str(&format!("<section><h2>{}</h2>", escape(block.heading)));
        for paragraph in block.paragraphs {
            html.push_str(&format!("<p>{}</p>", escape(paragraph)));
        }
        if !block.bullets.is_empty() {
            html.push_str("<ul>");
            for bullet in block.bullets {
                html.push_str(&format!("<li>{}</li>", escape(bullet)));
            }
            html.push_str("</ul>");
        }
        html.push_str("</section>");
    }
    html
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
