use url::form_urlencoded;

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Work,
    Blog,
    BlogDetail,
    Contact,
}

impl Page {
    /// Tab order. The detail page is not a tab; it is reached through the
    /// blog list.
    pub const TABS: [Page; 4] = [Page::Home, Page::Work, Page::Blog, Page::Contact];

    /// Value of the `page` query parameter. Home serializes as no parameter
    /// at all.
    fn as_param(self) -> Option<&'static str> {
        match self {
            Page::Home => None,
            Page::Work => Some("work"),
            Page::Blog => Some("blog"),
            Page::BlogDetail => Some("blogDetail"),
            Page::Contact => Some("contact"),
        }
    }

    fn from_param(value: &str) -> Option<Page> {
        match value {
            "work" => Some(Page::Work),
            "blog" => Some(Page::Blog),
            "blogDetail" => Some(Page::BlogDetail),
            "contact" => Some(Page::Contact),
            _ => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Work => "Work",
            Page::Blog => "Blog",
            Page::BlogDetail => "Blog",
            Page::Contact => "Contact",
        }
    }
}

// ---------------------------------------------------------------------------
// Navigation state
// ---------------------------------------------------------------------------

/// Which page is visible and, on the detail page, which post. The location
/// query string is the single external serialization of this pair.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavigationState {
    pub page: Page,
    pub selected_post_id: Option<String>,
}

impl NavigationState {
    /// Serialize to a query string. Home is the empty string; `post` appears
    /// only on the detail page.
    pub fn to_query(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        if let Some(page) = self.page.as_param() {
            query.append_pair("page", page);
        }
        if self.page == Page::BlogDetail
            && let Some(ref id) = self.selected_post_id
        {
            query.append_pair("post", id);
        }
        query.finish()
    }

    /// Decode a query string (leading `?` tolerated). Absent or unknown
    /// `page` means home; `post` is honored only on the detail page, and a
    /// detail page without a post falls back to the blog list.
    pub fn from_query(query: &str) -> Self {
        let query = query.trim_start_matches('?');
        let mut page = Page::Home;
        let mut post = None;
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "page" => page = Page::from_param(&value).unwrap_or(Page::Home),
                "post" => post = Some(value.into_owned()),
                _ => {}
            }
        }
        match (page, post) {
            (Page::BlogDetail, Some(id)) => Self {
                page: Page::BlogDetail,
                selected_post_id: Some(id),
            },
            (Page::BlogDetail, None) => Self {
                page: Page::Blog,
                selected_post_id: None,
            },
            (page, _) => Self {
                page,
                selected_post_id: None,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// Visited locations with a cursor, standing in for browser history.
/// Pushing after going back drops the forward tail, as browsers do.
#[derive(Debug)]
struct History {
    entries: Vec<String>,
    index: usize,
}

impl History {
    fn new(initial: String) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
        }
    }

    fn current(&self) -> &str {
        &self.entries[self.index]
    }

    fn push(&mut self, query: String) {
        self.entries.truncate(self.index + 1);
        self.entries.push(query);
        self.index += 1;
    }

    fn back(&mut self) -> Option<&str> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(&self.entries[self.index])
    }

    fn forward(&mut self) -> Option<&str> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(&self.entries[self.index])
    }
}

// ---------------------------------------------------------------------------
// Navigator
// ---------------------------------------------------------------------------

/// Owns the navigation state and its history. Every explicit transition
/// re-serializes into the location before anything else happens, so the
/// location never lags the state; on back/forward the stored location is
/// authoritative and state is re-derived from it.
#[derive(Debug)]
pub struct Navigator {
    state: NavigationState,
    history: History,
}

impl Navigator {
    /// Start from a location query, typically empty or a deep link. An
    /// invalid location normalizes to the nearest valid state.
    pub fn from_location(query: &str) -> Self {
        let state = NavigationState::from_query(query);
        let history = History::new(state.to_query());
        Self { state, history }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn page(&self) -> Page {
        self.state.page
    }

    pub fn selected_post_id(&self) -> Option<&str> {
        self.state.selected_post_id.as_deref()
    }

    /// The current serialized location, e.g. `page=blogDetail&post=abc`.
    pub fn location(&self) -> &str {
        self.history.current()
    }

    pub fn go_to(&mut self, page: Page) {
        self.state = NavigationState {
            page,
            selected_post_id: None,
        };
        self.history.push(self.state.to_query());
    }

    pub fn open_post(&mut self, post_id: &str) {
        self.state = NavigationState {
            page: Page::BlogDetail,
            selected_post_id: Some(post_id.to_string()),
        };
        self.history.push(self.state.to_query());
    }

    pub fn close_post(&mut self) {
        self.go_to(Page::Blog);
    }

    /// Step back in history. Returns false at the edge, leaving everything
    /// unchanged.
    pub fn back(&mut self) -> bool {
        let Some(query) = self.history.back() else {
            return false;
        };
        self.state = NavigationState::from_query(query);
        true
    }

    /// Step forward in history. Returns false at the edge.
    pub fn forward(&mut self) -> bool {
        let Some(query) = self.history.forward() else {
            return false;
        };
        self.state = NavigationState::from_query(query);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_post_serializes_page_and_post() {
        let mut nav = Navigator::from_location("");
        nav.open_post("abc");
        assert_eq!(nav.location(), "page=blogDetail&post=abc");
        assert_eq!(nav.page(), Page::BlogDetail);
        assert_eq!(nav.selected_post_id(), Some("abc"));
    }

    #[test]
    fn back_to_blog_clears_the_selected_post() {
        let mut nav = Navigator::from_location("");
        nav.go_to(Page::Blog);
        nav.open_post("abc");

        assert!(nav.back());
        assert_eq!(
            nav.state(),
            &NavigationState {
                page: Page::Blog,
                selected_post_id: None
            }
        );
        assert_eq!(nav.location(), "page=blog");
    }

    #[test]
    fn home_serializes_to_an_empty_query() {
        let mut nav = Navigator::from_location("?page=contact");
        nav.go_to(Page::Home);
        assert_eq!(nav.location(), "");
    }

    #[test]
    fn decode_tolerates_a_leading_question_mark() {
        let state = NavigationState::from_query("?page=work");
        assert_eq!(state.page, Page::Work);
    }

    #[test]
    fn absent_page_parameter_means_home() {
        let state = NavigationState::from_query("");
        assert_eq!(state.page, Page::Home);
        assert_eq!(state.selected_post_id, None);
    }

    #[test]
    fn unknown_page_value_means_home() {
        let state = NavigationState::from_query("page=dashboard");
        assert_eq!(state.page, Page::Home);
    }

    #[test]
    fn detail_without_post_falls_back_to_the_blog_list() {
        let state = NavigationState::from_query("page=blogDetail");
        assert_eq!(state.page, Page::Blog);
        assert_eq!(state.selected_post_id, None);
    }

    #[test]
    fn stray_post_parameter_is_ignored_off_the_detail_page() {
        let state = NavigationState::from_query("page=work&post=abc");
        assert_eq!(state.page, Page::Work);
        assert_eq!(state.selected_post_id, None);
    }

    #[test]
    fn every_reachable_state_round_trips_through_the_query() {
        let mut nav = Navigator::from_location("");
        let states = [
            NavigationState::default(),
            NavigationState {
                page: Page::Work,
                selected_post_id: None,
            },
            NavigationState {
                page: Page::BlogDetail,
                selected_post_id: Some("abc".to_string()),
            },
            NavigationState {
                page: Page::Contact,
                selected_post_id: None,
            },
        ];
        for state in states {
            match (&state.page, &state.selected_post_id) {
                (Page::BlogDetail, Some(id)) => nav.open_post(id),
                _ => nav.go_to(state.page),
            }
            assert_eq!(NavigationState::from_query(nav.location()), state);
        }
    }

    #[test]
    fn post_ids_survive_percent_encoding() {
        let mut nav = Navigator::from_location("");
        nav.open_post("a b/c?");
        let decoded = NavigationState::from_query(nav.location());
        assert_eq!(decoded.selected_post_id.as_deref(), Some("a b/c?"));
    }

    #[test]
    fn forward_retraces_after_back() {
        let mut nav = Navigator::from_location("");
        nav.go_to(Page::Blog);
        nav.open_post("abc");

        assert!(nav.back());
        assert!(nav.forward());
        assert_eq!(nav.page(), Page::BlogDetail);
        assert_eq!(nav.selected_post_id(), Some("abc"));
    }

    #[test]
    fn navigating_after_back_drops_the_forward_tail() {
        let mut nav = Navigator::from_location("");
        nav.go_to(Page::Blog);
        nav.open_post("abc");
        assert!(nav.back());

        nav.go_to(Page::Contact);
        // The detail entry is gone.
        assert!(!nav.forward());
        assert_eq!(nav.page(), Page::Contact);
    }

    #[test]
    fn back_at_the_edge_changes_nothing() {
        let mut nav = Navigator::from_location("");
        assert!(!nav.back());
        assert_eq!(nav.page(), Page::Home);
        assert!(!nav.forward());
    }

    #[test]
    fn close_post_returns_to_the_blog_list() {
        let mut nav = Navigator::from_location("");
        nav.open_post("abc");
        nav.close_post();
        assert_eq!(nav.page(), Page::Blog);
        assert_eq!(nav.selected_post_id(), None);
        assert_eq!(nav.location(), "page=blog");
    }

    #[test]
    fn deep_link_location_is_normalized_on_start() {
        let nav = Navigator::from_location("?page=blogDetail");
        assert_eq!(nav.page(), Page::Blog);
        assert_eq!(nav.location(), "page=blog");

        let nav = Navigator::from_location("?page=blogDetail&post=xyz");
        assert_eq!(nav.selected_post_id(), Some("xyz"));
        assert_eq!(nav.location(), "page=blogDetail&post=xyz");
    }
}
