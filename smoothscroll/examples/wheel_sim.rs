// Example: drive the engine from a simulated 60fps frame loop.
use smoothscroll::{
    Disposition, Dom, Key, KeyInput, OverflowY, ScrollOptions, SmoothScroll, WheelInput,
};

/// A page with a single tall document and no inner scrollers.
struct Page {
    scroll_y: i64,
    content_height: f64,
    viewport_height: f64,
}

impl Dom for Page {
    type Node = u8;

    fn root(&self) -> u8 {
        0
    }

    fn body(&self) -> Option<u8> {
        Some(1)
    }

    fn parent(&self, node: &u8) -> Option<u8> {
        match node {
            0 => None,
            _ => Some(0),
        }
    }

    fn scroll_height(&self, _node: &u8) -> f64 {
        self.content_height
    }

    fn client_height(&self, _node: &u8) -> f64 {
        self.viewport_height
    }

    fn scroll_top(&self, _node: &u8) -> f64 {
        self.scroll_y as f64
    }

    fn overflow_y(&self, _node: &u8) -> OverflowY {
        OverflowY::Visible
    }

    fn node_name<'a>(&'a self, node: &'a u8) -> &'a str {
        match node {
            0 => "html",
            _ => "body",
        }
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn scroll_window_by(&mut self, _dx: i64, dy: i64) {
        let max = (self.content_height - self.viewport_height) as i64;
        self.scroll_y = (self.scroll_y + dy).clamp(0, max);
    }

    fn scroll_element_by(&mut self, _node: &u8, _dx: i64, _dy: i64) {}
}

fn run(engine: &mut SmoothScroll<u8>, page: &mut Page, now_ms: &mut u64) {
    loop {
        *now_ms += 16;
        let more = engine.tick(page, *now_ms);
        println!("t={now_ms}ms scroll_y={}", page.scroll_y);
        if !more {
            break;
        }
    }
}

fn main() {
    let mut page = Page {
        scroll_y: 0,
        content_height: 5000.0,
        viewport_height: 800.0,
    };
    let mut engine = SmoothScroll::new(ScrollOptions::new().with_acceleration(20, 3.0));
    let mut now_ms = 0u64;

    // Three quick notches down: the second and third are accelerated.
    for _ in 0..3 {
        let d = engine.on_wheel(&mut page, &WheelInput::vertical(1, -120.0), now_ms);
        if d == Disposition::PassThrough {
            println!("native scrolling");
        }
        now_ms += 8;
    }
    run(&mut engine, &mut page, &mut now_ms);

    // End jumps past the bottom by a small margin; the page clamps it.
    engine.on_key_down(&mut page, &KeyInput::new(Key::End, 1), now_ms);
    run(&mut engine, &mut page, &mut now_ms);

    println!("done: scroll_y={}", page.scroll_y);
}
