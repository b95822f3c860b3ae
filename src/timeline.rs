// Scroll-driven tween math: where an animation range starts and ends in
// scroll space, and how far along the container and each staggered word are
// at a given scroll offset. Everything here is plain geometry; the DOM
// binding in reveal.rs feeds in measured positions and applies the results
// as styles.

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Edge {
    Top,
    Center,
    Bottom,
}

impl Edge {
    fn fraction(self) -> f64 {
        match self {
            Edge::Top => 0.0,
            Edge::Center => 0.5,
            Edge::Bottom => 1.0,
        }
    }

    // One marker word: an edge name with an optional "+=N%"/"-=N%" suffix,
    // e.g. "bottom-=20%". The offset comes back as a signed fraction.
    fn parse(word: &str) -> Option<(Edge, f64)> {
        let (name, offset) = match word.find("-=").or_else(|| word.find("+=")) {
            Some(idx) => {
                let (name, rest) = word.split_at(idx);
                let sign = if rest.starts_with("-=") { -1.0 } else { 1.0 };
                let percent: f64 = rest[2..].trim_end_matches('%').parse().ok()?;
                (name, sign * percent / 100.0)
            }
            None => (word, 0.0),
        };
        let edge = match name {
            "top" => Edge::Top,
            "center" => Edge::Center,
            "bottom" => Edge::Bottom,
            _ => return None,
        };
        Some((edge, offset))
    }
}

// Measured position of the trigger element within its scroller
#[derive(Debug, Clone, Copy)]
pub struct TriggerGeometry {
    pub element_top: f64,
    pub element_height: f64,
    pub viewport_height: f64,
}

// A point in scroll space, written the way the landing page configures its
// reveals: an "<element edge> <viewport edge>" pair ("center bottom-=20%"),
// or "+=N%" meaning N viewport-heights past the range start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Marker {
    Edges {
        element: Edge,
        element_offset: f64,
        viewport: Edge,
        viewport_offset: f64,
    },
    Relative(f64),
}

impl Marker {
    pub const BOTTOM_BOTTOM: Marker = Marker::Edges {
        element: Edge::Bottom,
        element_offset: 0.0,
        viewport: Edge::Bottom,
        viewport_offset: 0.0,
    };
    pub const CENTER_CENTER: Marker = Marker::Edges {
        element: Edge::Center,
        element_offset: 0.0,
        viewport: Edge::Center,
        viewport_offset: 0.0,
    };
    pub const CENTER_BOTTOM: Marker = Marker::Edges {
        element: Edge::Center,
        element_offset: 0.0,
        viewport: Edge::Bottom,
        viewport_offset: 0.0,
    };
    pub const TOP_CENTER: Marker = Marker::Edges {
        element: Edge::Top,
        element_offset: 0.0,
        viewport: Edge::Center,
        viewport_offset: 0.0,
    };
    // "center bottom-=20%": the words start a fifth of a viewport early
    pub const CENTER_BOTTOM_SHIFTED: Marker = Marker::Edges {
        element: Edge::Center,
        element_offset: 0.0,
        viewport: Edge::Bottom,
        viewport_offset: -0.2,
    };

    pub fn parse(text: &str) -> Option<Marker> {
        let text = text.trim();
        if let Some(rest) = text.strip_prefix("+=") {
            let percent: f64 = rest.trim().trim_end_matches('%').parse().ok()?;
            return Some(Marker::Relative(percent / 100.0));
        }
        let mut words = text.split_whitespace();
        let (element, element_offset) = Edge::parse(words.next()?)?;
        let (viewport, viewport_offset) = Edge::parse(words.next()?)?;
        if words.next().is_some() {
            return None;
        }
        Some(Marker::Edges {
            element,
            element_offset,
            viewport,
            viewport_offset,
        })
    }

    // Absolute scroll offset at which this marker is hit. Relative markers
    // are measured from `range_start` (the resolved start of their range).
    pub fn resolve(self, geometry: TriggerGeometry, range_start: Option<f64>) -> f64 {
        match self {
            Marker::Edges {
                element,
                element_offset,
                viewport,
                viewport_offset,
            } => {
                let element_point =
                    geometry.element_top + (element.fraction() + element_offset) * geometry.element_height;
                let viewport_point = (viewport.fraction() + viewport_offset) * geometry.viewport_height;
                element_point - viewport_point
            }
            Marker::Relative(fraction) => {
                range_start.unwrap_or(geometry.element_top) + fraction * geometry.viewport_height
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRange {
    pub start: f64,
    pub end: f64,
}

impl ScrollRange {
    pub const EMPTY: ScrollRange = ScrollRange { start: 0.0, end: 0.0 };

    pub fn new(start: Marker, end: Marker, geometry: TriggerGeometry) -> ScrollRange {
        let start = start.resolve(geometry, None);
        let end = end.resolve(geometry, Some(start));
        ScrollRange { start, end }
    }

    // Clamped linear progress of a scroll offset through the range. A
    // degenerate range snaps straight from 0 to 1 at its start.
    pub fn progress(&self, offset: f64) -> f64 {
        if self.end <= self.start {
            return if offset >= self.start { 1.0 } else { 0.0 };
        }
        ((offset - self.start) / (self.end - self.start)).max(0.0).min(1.0)
    }

    pub fn span(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }
}

// Scrubbed stagger: every word tween shares one duration, each starts a
// fixed step after the previous, and the range progress is mapped across
// the whole strip so words light up in reading order.
#[derive(Debug, Clone, Copy)]
pub struct Stagger {
    pub duration: f64,
    pub step: f64,
}

impl Stagger {
    pub const WORDS: Stagger = Stagger {
        duration: 0.5,
        step: 0.05,
    };

    pub fn word_progress(&self, progress: f64, index: usize, count: usize) -> f64 {
        if count == 0 {
            return progress.max(0.0).min(1.0);
        }
        let total = self.duration + self.step * count.saturating_sub(1) as f64;
        let t = progress.max(0.0).min(1.0) * total;
        ((t - self.step * index as f64) / self.duration)
            .max(0.0)
            .min(1.0)
    }
}

pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    const GEOMETRY: TriggerGeometry = TriggerGeometry {
        element_top: 1000.0,
        element_height: 200.0,
        viewport_height: 800.0,
    };

    #[test]
    fn parses_edge_pair_markers() {
        assert_eq!(Marker::parse("bottom bottom"), Some(Marker::BOTTOM_BOTTOM));
        assert_eq!(Marker::parse("center center"), Some(Marker::CENTER_CENTER));
        assert_eq!(Marker::parse("top center"), Some(Marker::TOP_CENTER));
    }

    #[test]
    fn parses_viewport_offset_suffix() {
        assert_eq!(
            Marker::parse("center bottom-=20%"),
            Some(Marker::CENTER_BOTTOM_SHIFTED)
        );
    }

    #[test]
    fn parses_relative_markers() {
        assert_eq!(Marker::parse("+=300%"), Some(Marker::Relative(3.0)));
        assert_eq!(Marker::parse("+=50%"), Some(Marker::Relative(0.5)));
    }

    #[test]
    fn rejects_malformed_markers() {
        assert_eq!(Marker::parse(""), None);
        assert_eq!(Marker::parse("bottom"), None);
        assert_eq!(Marker::parse("left right"), None);
        assert_eq!(Marker::parse("bottom bottom bottom"), None);
        assert_eq!(Marker::parse("+=oops"), None);
    }

    #[test]
    fn resolves_edge_markers_against_geometry() {
        assert_eq!(Marker::parse("top top").unwrap().resolve(GEOMETRY, None), 1000.0);
        assert_eq!(Marker::BOTTOM_BOTTOM.resolve(GEOMETRY, None), 400.0);
        assert_eq!(Marker::CENTER_CENTER.resolve(GEOMETRY, None), 700.0);
        assert_eq!(Marker::CENTER_BOTTOM_SHIFTED.resolve(GEOMETRY, None), 460.0);
    }

    #[test]
    fn relative_marker_extends_past_range_start() {
        assert_eq!(Marker::Relative(3.0).resolve(GEOMETRY, Some(700.0)), 3100.0);
    }

    #[test]
    fn range_progress_is_clamped_and_linear() {
        let range = ScrollRange { start: 100.0, end: 300.0 };
        assert_eq!(range.progress(0.0), 0.0);
        assert_eq!(range.progress(100.0), 0.0);
        assert_eq!(range.progress(200.0), 0.5);
        assert_eq!(range.progress(300.0), 1.0);
        assert_eq!(range.progress(900.0), 1.0);
    }

    #[test]
    fn degenerate_range_snaps_at_start() {
        let range = ScrollRange { start: 100.0, end: 100.0 };
        assert_eq!(range.progress(99.0), 0.0);
        assert_eq!(range.progress(100.0), 1.0);
    }

    #[test]
    fn words_finish_in_reading_order() {
        let count = 10;
        for step in 0..=100 {
            let p = step as f64 / 100.0;
            for i in 1..count {
                let earlier = Stagger::WORDS.word_progress(p, i - 1, count);
                let later = Stagger::WORDS.word_progress(p, i, count);
                assert!(earlier >= later, "word {} ahead of word {}", i, i - 1);
            }
        }
    }

    #[test]
    fn word_progress_is_monotonic_in_scroll() {
        let count = 8;
        for i in 0..count {
            let mut last = 0.0;
            for step in 0..=200 {
                let p = step as f64 / 200.0;
                let wp = Stagger::WORDS.word_progress(p, i, count);
                assert!(wp + 1e-12 >= last, "regression at word {} p {}", i, p);
                last = wp;
            }
        }
    }

    #[test]
    fn all_words_complete_at_full_progress() {
        let count = 12;
        for i in 0..count {
            assert!((Stagger::WORDS.word_progress(1.0, i, count) - 1.0).abs() < 1e-9);
            assert_eq!(Stagger::WORDS.word_progress(0.0, i, count), 0.0);
        }
    }

    #[test]
    fn opacity_and_blur_tween_monotonically() {
        let range = ScrollRange { start: 0.0, end: 1000.0 };
        let count = 6;
        let mut last_opacity = vec![0.0; count];
        let mut last_blur = vec![f64::INFINITY; count];
        for step in 0..=100 {
            let p = range.progress(step as f64 * 10.0);
            for i in 0..count {
                let t = Stagger::WORDS.word_progress(p, i, count);
                let opacity = lerp(0.1, 1.0, t);
                let blur = lerp(4.0, 0.0, t);
                assert!(opacity + 1e-12 >= last_opacity[i]);
                assert!(blur <= last_blur[i] + 1e-12);
                assert!((0.1..=1.0).contains(&opacity));
                assert!((0.0..=4.0).contains(&blur));
                last_opacity[i] = opacity;
                last_blur[i] = blur;
            }
        }
        for i in 0..count {
            assert!((last_opacity[i] - 1.0).abs() < 1e-9);
            assert!(last_blur[i] < 1e-9);
        }
    }

    #[test]
    fn rotation_unwinds_to_zero() {
        let range = ScrollRange { start: 0.0, end: 100.0 };
        assert_eq!(lerp(3.0, 0.0, range.progress(0.0)), 3.0);
        assert_eq!(lerp(3.0, 0.0, range.progress(50.0)), 1.5);
        assert_eq!(lerp(3.0, 0.0, range.progress(100.0)), 0.0);
    }
}
