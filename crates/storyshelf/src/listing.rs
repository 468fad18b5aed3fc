//! Client-side sorting, year grouping and pagination of stories.

use crate::catalog::Story;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

/// Stories per page on the home listing.
pub const HOME_PER_PAGE: usize = 9;
/// Stories per page in the year archive.
pub const ARCHIVE_PER_PAGE: usize = 20;

const MONTH_NAMES: [&str; 12] = [
    "январь",
    "февраль",
    "март",
    "апрель",
    "май",
    "июнь",
    "июль",
    "август",
    "сентябрь",
    "октябрь",
    "ноябрь",
    "декабрь",
];

/// Month precision date written as `"M.YYYY"`, `"MM.YYYY"` or `"<month>.YYYY"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StoryDate {
    pub year: i32,
    /// 1-based
    pub month: u32,
}

impl StoryDate {
    /// Parse a story date. The month is a number 1-12 or a case-insensitive
    /// prefix of a Russian month name (`"март"`, `"Сент"`).
    pub fn parse(raw: &str) -> Option<Self> {
        let (month_part, year_part) = split_date(raw)?;
        let year = year_part.parse::<i32>().ok()?;

        if month_part.is_empty() {
            return None;
        }

        let month = match month_part.parse::<u32>() {
            Ok(n) if (1..=12).contains(&n) => n,
            Ok(_) => return None,
            Err(_) => {
                let needle = month_part.to_lowercase();
                let idx = MONTH_NAMES.iter().position(|m| m.starts_with(&needle))?;
                idx as u32 + 1
            }
        };

        Some(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

fn split_date(raw: &str) -> Option<(&str, &str)> {
    let mut parts = raw.trim().split('.');
    let month = parts.next()?.trim();
    let year = parts.next()?.trim();
    if parts.next().is_some() {
        return None;
    }
    Some((month, year))
}

/// Year of a story date; only the year part has to be valid.
pub fn story_year(raw: &str) -> Option<i32> {
    split_date(raw).and_then(|(_, year)| year.parse().ok())
}

/// Ordering of the home listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Most liked first
    #[default]
    Likes,
    /// Newest `story_date` first
    Date,
}

impl SortMode {
    /// `"date"` selects [`SortMode::Date`]; anything else is likes.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("date") => Self::Date,
            _ => Self::Likes,
        }
    }

    pub fn as_param(self) -> &'static str {
        match self {
            Self::Likes => "likes",
            Self::Date => "date",
        }
    }
}

/// Sort stories in place. Stories with a missing or unreadable date count
/// as written in the month of `today`. The sort is stable.
pub fn sort_stories(stories: &mut [Story], mode: SortMode, today: NaiveDate) {
    match mode {
        SortMode::Likes => stories.sort_by(|a, b| b.likes_count.cmp(&a.likes_count)),
        SortMode::Date => {
            let now = StoryDate::from_date(today);
            stories.sort_by_cached_key(|s| {
                let date = s
                    .story_date
                    .as_deref()
                    .and_then(|raw| {
                        let parsed = StoryDate::parse(raw);
                        if parsed.is_none() {
                            tracing::warn!(slug = %s.slug, story_date = raw, "unreadable story_date");
                        }
                        parsed
                    })
                    .unwrap_or(now);
                std::cmp::Reverse(date)
            });
        }
    }
}

/// A story and its 1-based position within its year.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveEntry<'a> {
    pub index: usize,
    pub story: &'a Story,
}

#[derive(Debug, Clone, PartialEq)]
pub struct YearGroup<'a> {
    pub year: i32,
    pub entries: Vec<ArchiveEntry<'a>>,
}

/// Group stories by the year of their `story_date`, keeping input order
/// inside each year. Missing or unreadable years fall into `current_year`.
pub fn group_by_year(stories: &[Story], descending: bool, current_year: i32) -> Vec<YearGroup<'_>> {
    let mut by_year: BTreeMap<i32, Vec<&Story>> = BTreeMap::new();
    for story in stories {
        let year = story
            .story_date
            .as_deref()
            .and_then(story_year)
            .unwrap_or(current_year);
        by_year.entry(year).or_default().push(story);
    }

    let mut groups: Vec<YearGroup<'_>> = by_year
        .into_iter()
        .map(|(year, stories)| YearGroup {
            year,
            entries: stories
                .into_iter()
                .enumerate()
                .map(|(i, story)| ArchiveEntry {
                    index: i + 1,
                    story,
                })
                .collect(),
        })
        .collect();

    if descending {
        groups.reverse();
    }
    groups
}

/// Restrict year groups to the entries of one page, counting across years.
/// Groups left without entries are dropped.
pub fn archive_page<'a>(groups: &[YearGroup<'a>], page: usize, per_page: usize) -> Page<YearGroup<'a>> {
    let total_items: usize = groups.iter().map(|g| g.entries.len()).sum();
    let window = PageWindow::new(total_items, page, per_page);

    let mut seen = 0;
    let mut items = Vec::new();
    for group in groups {
        let entries: Vec<ArchiveEntry<'a>> = group
            .entries
            .iter()
            .enumerate()
            .filter(|(i, _)| window.contains(seen + i))
            .map(|(_, e)| e.clone())
            .collect();
        seen += group.entries.len();
        if !entries.is_empty() {
            items.push(YearGroup {
                year: group.year,
                entries,
            });
        }
    }

    window.into_page(items)
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<T> {
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

struct PageWindow {
    page: usize,
    start: usize,
    end: usize,
    total_pages: usize,
    total_items: usize,
}

impl PageWindow {
    fn new(total_items: usize, page: usize, per_page: usize) -> Self {
        let page = page.max(1);
        let per_page = per_page.max(1);
        let start = (page - 1).saturating_mul(per_page);
        Self {
            page,
            start,
            end: start.saturating_add(per_page),
            total_pages: total_items.div_ceil(per_page),
            total_items,
        }
    }

    fn contains(&self, idx: usize) -> bool {
        idx >= self.start && idx < self.end
    }

    fn into_page<T>(self, items: Vec<T>) -> Page<T> {
        Page {
            items,
            page: self.page,
            total_pages: self.total_pages,
            total_items: self.total_items,
        }
    }
}

/// Slice out one page. `page` is 1-based (clamped to >= 1); a page past the
/// end is empty.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let window = PageWindow::new(items.len(), page, per_page);
    let slice = items
        .get(window.start.min(items.len())..window.end.min(items.len()))
        .unwrap_or(&[])
        .to_vec();
    window.into_page(slice)
}

/// An entry of the page-number strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Number(usize),
    Gap,
}

/// Page numbers to show for `current` of `total`.
///
/// Up to seven pages are all shown. Beyond that: the first page, a gap when
/// `current > 3`, the neighbours of `current`, a gap when
/// `current < total - 2`, and the last page.
pub fn page_window(current: usize, total: usize) -> Vec<PageLink> {
    if total <= 7 {
        return (1..=total).map(PageLink::Number).collect();
    }

    let mut links = vec![PageLink::Number(1)];
    if current > 3 {
        links.push(PageLink::Gap);
    }

    let lo = current.saturating_sub(1).max(2);
    let hi = current.saturating_add(1).min(total - 1);
    links.extend((lo..=hi).map(PageLink::Number));

    if current.saturating_add(2) < total {
        links.push(PageLink::Gap);
    }
    links.push(PageLink::Number(total));
    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn story(slug: &str, likes: i64, date: Option<&str>) -> Story {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Story {
            id: Uuid::new_v4(),
            title: slug.to_uppercase(),
            slug: slug.to_string(),
            description: String::new(),
            content: String::new(),
            image_url: None,
            published: true,
            likes_count: likes,
            views_count: 0,
            created_at: ts,
            updated_at: ts,
            story_date: date.map(str::to_string),
        }
    }

    fn slugs(stories: &[Story]) -> Vec<&str> {
        stories.iter().map(|s| s.slug.as_str()).collect()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    #[test]
    fn parse_numeric_dates() {
        assert_eq!(StoryDate::parse("03.2020"), Some(StoryDate { year: 2020, month: 3 }));
        assert_eq!(StoryDate::parse(" 3 . 2020 "), Some(StoryDate { year: 2020, month: 3 }));
        assert_eq!(StoryDate::parse("13.2020"), None);
        assert_eq!(StoryDate::parse("0.2020"), None);
        assert_eq!(StoryDate::parse("2020"), None);
        assert_eq!(StoryDate::parse("1.2.2020"), None);
        assert_eq!(StoryDate::parse("03.x"), None);
    }

    #[test]
    fn parse_month_names() {
        assert_eq!(StoryDate::parse("март.2020"), Some(StoryDate { year: 2020, month: 3 }));
        assert_eq!(StoryDate::parse("Сент.1999"), Some(StoryDate { year: 1999, month: 9 }));
        assert_eq!(StoryDate::parse("ию.2001"), Some(StoryDate { year: 2001, month: 6 }));
        assert_eq!(StoryDate::parse("foo.2020"), None);
        assert_eq!(StoryDate::parse(".2020"), None);
    }

    #[test]
    fn year_only_needs_year() {
        assert_eq!(story_year("foo.2020"), Some(2020));
        assert_eq!(story_year("2020"), None);
    }

    #[test]
    fn sort_mode_param() {
        assert_eq!(SortMode::from_param(Some("date")), SortMode::Date);
        assert_eq!(SortMode::from_param(Some("likes")), SortMode::Likes);
        assert_eq!(SortMode::from_param(None), SortMode::Likes);
    }

    #[test]
    fn sort_by_likes_desc_stable() {
        let mut stories = vec![story("a", 1, None), story("b", 5, None), story("c", 1, None)];
        sort_stories(&mut stories, SortMode::Likes, today());
        assert_eq!(slugs(&stories), vec!["b", "a", "c"]);
    }

    #[test]
    fn sort_by_date_newest_first() {
        let mut stories = vec![
            story("old", 0, Some("01.2001")),
            story("undated", 0, None),
            story("mid", 0, Some("май.2010")),
            story("new", 0, Some("12.2020")),
        ];
        sort_stories(&mut stories, SortMode::Date, today());
        assert_eq!(slugs(&stories), vec!["undated", "new", "mid", "old"]);
    }

    #[test]
    fn group_by_year_orders_and_indexes() {
        let stories = vec![
            story("a", 0, Some("01.2019")),
            story("b", 0, Some("05.2020")),
            story("c", 0, Some("07.2019")),
            story("d", 0, None),
        ];
        let groups = group_by_year(&stories, false, 2025);
        let years: Vec<i32> = groups.iter().map(|g| g.year).collect();
        assert_eq!(years, vec![2019, 2020, 2025]);
        assert_eq!(groups[0].entries[1].index, 2);
        assert_eq!(groups[0].entries[1].story.slug, "c");

        let desc = group_by_year(&stories, true, 2025);
        assert_eq!(desc[0].year, 2025);
    }

    #[test]
    fn archive_page_spans_years() {
        let stories = vec![
            story("a", 0, Some("01.2019")),
            story("b", 0, Some("02.2019")),
            story("c", 0, Some("01.2020")),
            story("d", 0, Some("02.2020")),
        ];
        let groups = group_by_year(&stories, false, 2025);
        let page = archive_page(&groups, 2, 3);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].year, 2020);
        assert_eq!(page.items[0].entries[0].story.slug, "d");
        assert_eq!(page.items[0].entries[0].index, 2);
    }

    #[test]
    fn paginate_slices() {
        let items: Vec<u32> = (1..=20).collect();
        let page = paginate(&items, 3, 9);
        assert_eq!(page.items, vec![19, 20]);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_prev());
        assert!(!page.has_next());

        let clamped = paginate(&items, 0, 9);
        assert_eq!(clamped.page, 1);
        assert_eq!(clamped.items.len(), 9);

        let past = paginate(&items, 10, 9);
        assert!(past.items.is_empty());

        let empty = paginate::<u32>(&[], 1, 9);
        assert_eq!(empty.total_pages, 0);
    }

    #[test]
    fn window_small_shows_all() {
        assert_eq!(
            page_window(2, 4),
            vec![
                PageLink::Number(1),
                PageLink::Number(2),
                PageLink::Number(3),
                PageLink::Number(4)
            ]
        );
    }

    #[test]
    fn window_middle_has_two_gaps() {
        use PageLink::*;
        assert_eq!(
            page_window(5, 10),
            vec![Number(1), Gap, Number(4), Number(5), Number(6), Gap, Number(10)]
        );
    }

    #[test]
    fn window_edges() {
        use PageLink::*;
        assert_eq!(
            page_window(1, 10),
            vec![Number(1), Number(2), Gap, Number(10)]
        );
        assert_eq!(
            page_window(10, 10),
            vec![Number(1), Gap, Number(9), Number(10)]
        );
        assert_eq!(
            page_window(3, 10),
            vec![Number(1), Number(2), Number(3), Number(4), Gap, Number(10)]
        );
    }

    #[test]
    fn window_past_the_end_does_not_overflow() {
        use PageLink::*;
        assert_eq!(page_window(usize::MAX, 10), vec![Number(1), Gap, Number(10)]);
        assert_eq!(page_window(usize::MAX - 1, 10), vec![Number(1), Gap, Number(10)]);
    }
}
