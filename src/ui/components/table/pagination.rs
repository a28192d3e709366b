use std::num::NonZeroU32;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::Theme;

/// Build a page size at compile time. Panics on zero.
pub const fn page_size(n: u32) -> NonZeroU32 {
    match NonZeroU32::new(n) {
        Some(size) => size,
        None => panic!("page size must be non-zero"),
    }
}

pub const DEFAULT_PAGE_SIZES: [NonZeroU32; 3] = [page_size(5), page_size(10), page_size(15)];
pub const DEFAULT_PAGE_SIZE: NonZeroU32 = page_size(5);

/// Pagination props. Owned by the consumer; the table only reads them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based.
    pub current_page: u32,
    pub items_per_page: NonZeroU32,
    pub total_results: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current_page: 1,
            items_per_page: DEFAULT_PAGE_SIZE,
            total_results: 0,
        }
    }
}

impl Pagination {
    pub const fn new(current_page: u32, items_per_page: NonZeroU32, total_results: u32) -> Self {
        Self {
            current_page,
            items_per_page,
            total_results,
        }
    }

    /// `ceil(total_results / items_per_page)`; zero when there are no results.
    pub const fn total_pages(&self) -> u32 {
        self.total_results.div_ceil(self.items_per_page.get())
    }

    pub const fn can_prev(&self) -> bool {
        self.total_pages() > 0 && self.current_page > 1
    }

    pub const fn can_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// Same pagination with `current_page` moved into `[1, max(total_pages, 1)]`.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            current_page: self.current_page.clamp(1, self.total_pages().max(1)),
            ..self
        }
    }

    pub const fn is_in_range(&self) -> bool {
        let last = if self.total_pages() == 0 {
            1
        } else {
            self.total_pages()
        };
        self.current_page >= 1 && self.current_page <= last
    }

    pub fn page_label(&self) -> String {
        format!("Page {} of {}", self.current_page, self.total_pages())
    }
}

/// What the user asked the pager to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageIntent {
    Previous,
    Next,
    GrowPageSize,
    ShrinkPageSize,
    /// Next larger size, wrapping around to the smallest.
    CyclePageSize,
}

/// Change request emitted by the pager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    PageChange(u32),
    PageSizeChange(NonZeroU32),
}

/// Screen areas of the pager's clickable controls, from the last render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PagerLayout {
    pub size: Rect,
    pub prev: Rect,
    pub next: Rect,
}

/// Page-size selector plus prev/next navigation.
///
/// The pager never changes the pagination it is given. It turns intents into
/// at most one [`PageEvent`], computed from the pagination at that moment.
#[derive(Debug, Clone)]
pub struct Pager {
    sizes: Vec<NonZeroU32>,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZES.to_vec())
    }
}

impl Pager {
    pub fn new(mut sizes: Vec<NonZeroU32>) -> Self {
        sizes.sort_unstable();
        sizes.dedup();
        if sizes.is_empty() {
            sizes = DEFAULT_PAGE_SIZES.to_vec();
        }
        Self { sizes }
    }

    pub fn sizes(&self) -> &[NonZeroU32] {
        &self.sizes
    }

    pub fn request(&self, pagination: &Pagination, intent: PageIntent) -> Option<PageEvent> {
        let size = pagination.items_per_page;
        match intent {
            PageIntent::Previous => pagination
                .can_prev()
                .then(|| PageEvent::PageChange(pagination.current_page - 1)),
            PageIntent::Next => pagination
                .can_next()
                .then(|| PageEvent::PageChange(pagination.current_page + 1)),
            PageIntent::GrowPageSize => self
                .sizes
                .iter()
                .find(|&&s| s > size)
                .map(|&s| PageEvent::PageSizeChange(s)),
            PageIntent::ShrinkPageSize => self
                .sizes
                .iter()
                .rev()
                .find(|&&s| s < size)
                .map(|&s| PageEvent::PageSizeChange(s)),
            PageIntent::CyclePageSize => self
                .sizes
                .iter()
                .find(|&&s| s > size)
                .or_else(|| self.sizes.first())
                .filter(|&&s| s != size)
                .map(|&s| PageEvent::PageSizeChange(s)),
        }
    }

    /// Draw the pager on one line and return where its controls landed.
    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        pagination: &Pagination,
        theme: &Theme,
    ) -> PagerLayout {
        if area.height == 0 {
            return PagerLayout::default();
        }
        let area = Rect { height: 1, ..area };

        let muted = Style::default().fg(theme.subtext0());
        let control = |enabled: bool| {
            if enabled {
                Style::default()
                    .fg(theme.mauve())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.disabled())
            }
        };

        let showing = Span::styled("Showing ", muted);
        let size = Span::styled(
            format!("[ {} ]", pagination.items_per_page),
            Style::default()
                .fg(theme.text())
                .bg(theme.surface0())
                .add_modifier(Modifier::BOLD),
        );
        let of = Span::styled(format!(" of {} Results", pagination.total_results), muted);

        let size_rect = span_rect(area, area.x, &showing, &size);
        frame.render_widget(Paragraph::new(Line::from(vec![showing, size, of])), area);

        let label = Span::styled(format!("{}  ", pagination.page_label()), muted);
        let prev = Span::styled(" ‹ ", control(pagination.can_prev()));
        let gap = Span::raw(" ");
        let next = Span::styled(" › ", control(pagination.can_next()));

        let width = [&label, &prev, &gap, &next]
            .iter()
            .map(|span| u16::try_from(span.width()).unwrap_or(u16::MAX))
            .fold(0u16, u16::saturating_add)
            .min(area.width);
        let start = area.right().saturating_sub(width);
        let right = Rect::new(start, area.y, width, 1);

        let prev_rect = span_rect(area, start, &label, &prev);
        let next_x = prev_rect.right().saturating_add(1);
        let next_rect = span_rect(area, next_x, &Span::raw(""), &next);

        frame.render_widget(Paragraph::new(Line::from(vec![label, prev, gap, next])), right);

        PagerLayout {
            size: size_rect,
            prev: prev_rect,
            next: next_rect,
        }
    }
}

/// Area covered by `span` when it follows `before` starting at column `x`.
fn span_rect(area: Rect, x: u16, before: &Span<'_>, span: &Span<'_>) -> Rect {
    let offset = u16::try_from(before.width()).unwrap_or(u16::MAX);
    let width = u16::try_from(span.width()).unwrap_or(u16::MAX);
    Rect::new(x.saturating_add(offset), area.y, width, 1).intersection(area)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn pagination(current_page: u32, size: u32, total: u32) -> Pagination {
        Pagination::new(current_page, page_size(size), total)
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(pagination(1, 5, 12).total_pages(), 3);
        assert_eq!(pagination(1, 5, 10).total_pages(), 2);
        assert_eq!(pagination(1, 5, 1).total_pages(), 1);
        assert_eq!(pagination(1, 15, 0).total_pages(), 0);
    }

    #[test]
    fn test_total_pages_zero_iff_no_results() {
        for size in [5, 10, 15] {
            for total in 0..50 {
                let pages = pagination(1, size, total).total_pages();
                assert_eq!(pages == 0, total == 0, "size={size} total={total}");
                assert_eq!(pages, total.div_ceil(size));
            }
        }
    }

    #[test]
    fn test_controls_enabled_within_range() {
        for total in 1..40 {
            let pages = pagination(1, 5, total).total_pages();
            for page in 1..=pages {
                let p = pagination(page, 5, total);
                assert_eq!(p.can_prev(), page > 1);
                assert_eq!(p.can_next(), page < pages);
            }
        }
    }

    #[test]
    fn test_last_page_of_twelve() {
        let p = pagination(3, 5, 12);
        assert_eq!(p.total_pages(), 3);
        assert!(!p.can_next());
        assert!(p.can_prev());
    }

    #[test]
    fn test_zero_results_disables_both_controls() {
        for page in [1, 2, 7] {
            let p = pagination(page, 5, 0);
            assert!(!p.can_prev());
            assert!(!p.can_next());
        }
        assert_eq!(pagination(1, 5, 0).page_label(), "Page 1 of 0");
    }

    #[test]
    fn test_next_emits_once_with_following_page() {
        let pager = Pager::default();
        assert_eq!(
            pager.request(&pagination(1, 5, 12), PageIntent::Next),
            Some(PageEvent::PageChange(2))
        );
        assert_eq!(pager.request(&pagination(3, 5, 12), PageIntent::Next), None);
        assert_eq!(
            pager.request(&pagination(3, 5, 12), PageIntent::Previous),
            Some(PageEvent::PageChange(2))
        );
        assert_eq!(pager.request(&pagination(1, 5, 12), PageIntent::Previous), None);
    }

    #[test]
    fn test_size_change_carries_new_size_only() {
        let pager = Pager::default();
        let p = pagination(3, 5, 12);

        assert_eq!(
            pager.request(&p, PageIntent::GrowPageSize),
            Some(PageEvent::PageSizeChange(page_size(10)))
        );
        assert_eq!(pager.request(&p, PageIntent::ShrinkPageSize), None);
        assert_eq!(
            pager.request(&pagination(1, 15, 12), PageIntent::CyclePageSize),
            Some(PageEvent::PageSizeChange(page_size(5)))
        );
    }

    #[test]
    fn test_pager_normalises_sizes() {
        let pager = Pager::new(vec![page_size(15), page_size(5), page_size(15)]);
        assert_eq!(pager.sizes(), &[page_size(5), page_size(15)]);
        assert_eq!(Pager::new(Vec::new()).sizes(), &DEFAULT_PAGE_SIZES);
    }

    #[test]
    fn test_clamped() {
        assert_eq!(pagination(9, 5, 12).clamped().current_page, 3);
        assert_eq!(pagination(4, 5, 0).clamped().current_page, 1);
        assert_eq!(pagination(0, 5, 12).clamped().current_page, 1);
        assert!(!pagination(4, 5, 12).is_in_range());
        assert!(pagination(1, 5, 0).is_in_range());
    }

    #[test]
    fn test_render_reports_control_areas() {
        let backend = TestBackend::new(60, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        let pager = Pager::default();
        let p = pagination(1, 5, 12);
        let mut layout = PagerLayout::default();

        terminal
            .draw(|frame| layout = pager.render(frame, frame.area(), &p, &Theme::default()))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = (0..60u16).map(|x| buffer[(x, 0)].symbol().to_string()).collect();
        assert!(text.starts_with("Showing [ 5 ] of 12 Results"));
        assert!(text.contains("Page 1 of 3"));

        assert_eq!(layout.size, Rect::new(8, 0, 5, 1));
        assert_eq!(buffer[(layout.prev.x + 1, 0)].symbol(), "‹");
        assert_eq!(buffer[(layout.next.x + 1, 0)].symbol(), "›");
        assert_eq!(layout.next.right(), 60);
    }
}
