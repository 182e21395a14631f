use super::*;
use crate::model::Ball;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    FillCircle(Point, f32, Rgba),
    StrokeCircle(Point, f32, Stroke),
    Path(Point, Option<Point>, Point, Stroke, Option<[f32; 2]>),
    Text(Point, String),
    Arrowhead(Point, f32, f32),
}

#[derive(Default)]
struct Recorder {
    calls: Vec<Call>,
}

impl Surface for Recorder {
    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba) {
        self.calls.push(Call::FillCircle(center, radius, color));
    }

    fn stroke_circle(&mut self, center: Point, radius: f32, stroke: Stroke) {
        self.calls.push(Call::StrokeCircle(center, radius, stroke));
    }

    fn stroke_path(
        &mut self,
        start: Point,
        control: Option<Point>,
        end: Point,
        stroke: Stroke,
        dash: Option<[f32; 2]>,
    ) {
        self.calls.push(Call::Path(start, control, end, stroke, dash));
    }

    fn draw_text(&mut self, anchor: Point, text: &str, _size: f32, _color: Rgba) {
        self.calls.push(Call::Text(anchor, text.to_string()));
    }

    fn arrowhead(&mut self, tip: Point, angle: f32, size: f32, _color: Rgba) {
        self.calls.push(Call::Arrowhead(tip, angle, size));
    }
}

fn record(doc: &Document, options: &RenderOptions) -> Vec<Call> {
    let mut r = Recorder::default();
    draw_document(&mut r, doc, &Metrics::default(), options);
    r.calls
}

fn arrow(style: ArrowStyle) -> Arrow {
    Arrow {
        id: 1,
        ..Arrow::straight(Point::new(0.0, 0.0), Point::new(100.0, 0.0), style)
    }
}

// =============================================================================
// arrows
// =============================================================================

#[test]
fn curved_arrowhead_follows_control_to_end() {
    let mut a = arrow(ArrowStyle::Solid);
    a.control = Some(Point::new(100.0, -100.0));
    let doc = Document {
        arrows: vec![a],
        ..Document::default()
    };
    let calls = record(&doc, &RenderOptions::default());
    let head = calls.iter().find_map(|c| match c {
        Call::Arrowhead(tip, angle, _) => Some((*tip, *angle)),
        _ => None,
    });
    let (tip, angle) = head.expect("arrowhead drawn");
    assert_eq!(tip, Point::new(100.0, 0.0));
    assert!((angle - std::f32::consts::FRAC_PI_2).abs() < 1e-4);
}

#[test]
fn arrow_styles_map_to_strokes() {
    let doc = Document {
        arrows: vec![arrow(ArrowStyle::Dashed)],
        ..Document::default()
    };
    let calls = record(&doc, &RenderOptions::default());
    assert!(matches!(calls[0], Call::Path(_, None, _, _, Some([10.0, 5.0]))));

    let (stroke, dash) = arrow_stroke(ArrowStyle::Emphasis);
    assert!(stroke.width > arrow_stroke(ArrowStyle::Solid).0.width);
    assert_eq!(dash, None);
}

#[test]
fn arrow_label_is_drawn_when_present() {
    let mut a = arrow(ArrowStyle::Solid);
    a.label = "cut".to_string();
    let doc = Document {
        arrows: vec![a],
        ..Document::default()
    };
    let calls = record(&doc, &RenderOptions::default());
    assert!(calls.iter().any(|c| matches!(c, Call::Text(_, t) if t == "cut")));
}

// =============================================================================
// other entities
// =============================================================================

#[test]
fn draw_order_is_zones_lines_players_ball() {
    let doc = Document {
        players: vec![Player::new(Team::A, Point::new(10.0, 10.0), "")],
        ball: Some(Ball {
            pos: Point::new(20.0, 20.0),
        }),
        arrows: vec![arrow(ArrowStyle::Solid)],
        zones: vec![Zone::new(Point::new(50.0, 50.0), 30.0)],
        ..Document::default()
    };
    let calls = record(&doc, &RenderOptions::default());
    assert!(matches!(calls[0], Call::FillCircle(p, 30.0, _) if p == Point::new(50.0, 50.0)));
    let last = calls.last().expect("calls");
    assert!(matches!(last, Call::FillCircle(p, _, c) if *p == Point::new(20.0, 20.0) && *c == INK));
}

#[test]
fn hidden_players_are_not_drawn() {
    let mut p = Player::new(Team::B, Point::new(10.0, 10.0), "B1");
    p.visible = false;
    let doc = Document {
        players: vec![p],
        ..Document::default()
    };
    assert!(record(&doc, &RenderOptions::default()).is_empty());
}

#[test]
fn degenerate_pick_is_a_ring() {
    let p = Point::new(10.0, 10.0);
    let doc = Document {
        picks: vec![Pick::new(p, p)],
        ..Document::default()
    };
    let calls = record(&doc, &RenderOptions::default());
    assert_eq!(calls.len(), 1);
    assert!(matches!(calls[0], Call::StrokeCircle(c, _, _) if c == p));
}

#[test]
fn pick_ends_in_a_bar() {
    let doc = Document {
        picks: vec![Pick::new(Point::new(0.0, 0.0), Point::new(40.0, 0.0))],
        ..Document::default()
    };
    let calls = record(&doc, &RenderOptions::default());
    assert_eq!(calls.len(), 2);
    let Call::Path(a, None, b, _, None) = calls[1] else {
        panic!("expected end bar, got {:?}", calls[1]);
    };
    assert!((a.x - 40.0).abs() < 1e-4 && (b.x - 40.0).abs() < 1e-4);
    assert!(((a.y - b.y).abs() - 20.0).abs() < 1e-4);
}

#[test]
fn handles_only_when_requested() {
    let mut a = arrow(ArrowStyle::Solid);
    a.control = Some(Point::new(50.0, -30.0));
    let doc = Document {
        arrows: vec![a],
        ..Document::default()
    };
    let plain = record(&doc, &RenderOptions::default()).len();
    let with_handles = record(
        &doc,
        &RenderOptions {
            show_handles: true,
            active: None,
        },
    )
    .len();
    assert!(with_handles > plain);
}

// =============================================================================
// export surfaces
// =============================================================================

#[test]
fn svg_export_contains_shapes_and_escaped_labels() {
    let mut a = arrow(ArrowStyle::Dashed);
    a.label = "x<y & z".to_string();
    a.control = Some(Point::new(50.0, -40.0));
    let doc = Document {
        arrows: vec![a],
        zones: vec![Zone::new(Point::new(50.0, 50.0), 30.0)],
        ..Document::default()
    };
    let svg = svg::document_to_svg(&doc, &Metrics::default(), 1000.0, 600.0);
    assert!(svg.starts_with("<?xml"));
    assert!(svg.contains("<circle"));
    assert!(svg.contains(" Q "));
    assert!(svg.contains("stroke-dasharray"));
    assert!(svg.contains("x&lt;y &amp; z"));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn png_export_is_a_png_with_painted_pixels() {
    let doc = Document {
        ball: Some(Ball {
            pos: Point::new(20.0, 20.0),
        }),
        ..Document::default()
    };
    let bytes = raster::document_to_png(&doc, &Metrics::default(), 64, 48).expect("png");
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

    let mut surface = raster::RasterSurface::new(64, 48, WHITE).expect("surface");
    draw_document(&mut surface, &doc, &Metrics::default(), &RenderOptions::default());
    assert_eq!(surface.image().get_pixel(20, 20).0, [20, 20, 20, 255]);
    assert_eq!(surface.image().get_pixel(60, 40).0, [255, 255, 255, 255]);
}

#[test]
fn png_export_rejects_empty_canvas() {
    let result = raster::document_to_png(&Document::default(), &Metrics::default(), 0, 10);
    assert!(matches!(result, Err(raster::ExportError::EmptyCanvas(0, 10))));
}
