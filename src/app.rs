use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::DefaultTerminal;

use crate::api::types::{ContentBlock, PostSummary};
use crate::command::{self, Command};
use crate::content::ContentService;
use crate::event::{AppEvent, Event, EventHandler};
use crate::nav::{NavigationState, Navigator, Page};
use crate::projects;
use crate::store::KeyValueStore;
use crate::theme::Theme;
use crate::ui;

// ---------------------------------------------------------------------------
// App mode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMode {
    Normal,
    Command,
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    pub running: bool,
    pub events: EventHandler,

    // Navigation
    pub nav: Navigator,
    pub mode: AppMode,

    // Data state
    pub posts: Vec<PostSummary>,
    pub posts_loading: bool,
    pub used_fallback: bool,
    pub blocks: Vec<ContentBlock>,
    pub content_loading: bool,

    // Per-page selections
    pub work_selected: usize,
    pub blog_selected: usize,
    pub contact_selected: usize,
    pub detail_scroll: usize,

    // Input state
    pub command_input: String,

    // Presentation
    pub theme: Theme,
    pub show_help: bool,
    pub status_message: Option<String>,

    service: ContentService,
    store: Arc<dyn KeyValueStore>,
}

impl App {
    /// `location` is the starting query string, empty for home or a deep
    /// link like `page=blogDetail&post=abc`.
    pub fn new(service: ContentService, store: Arc<dyn KeyValueStore>, location: &str) -> Self {
        let theme = Theme::load(store.as_ref());
        Self {
            running: true,
            events: EventHandler::new(),
            nav: Navigator::from_location(location),
            mode: AppMode::Normal,
            posts: Vec::new(),
            posts_loading: false,
            used_fallback: false,
            blocks: Vec::new(),
            content_loading: false,
            work_selected: 0,
            blog_selected: 0,
            contact_selected: 0,
            detail_scroll: 0,
            command_input: String::new(),
            theme,
            show_help: false,
            status_message: None,
            service,
            store,
        }
    }

    // -- Main event loop ----------------------------------------------------

    pub async fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        // Resolve whatever the starting location points at.
        self.fetch_for_page();

        while self.running {
            terminal.draw(|frame| self.draw(frame))?;
            match self.events.next().await? {
                Event::Tick => self.tick(),
                Event::Crossterm(event) => {
                    if let crossterm::event::Event::Key(key) = event
                        && key.kind == crossterm::event::KeyEventKind::Press
                    {
                        self.handle_key_event(key);
                    }
                }
                Event::App(app_event) => self.handle_app_event(*app_event),
            }
        }
        Ok(())
    }

    fn draw(&self, frame: &mut ratatui::Frame) {
        ui::draw(frame, self);
    }

    fn tick(&self) {}

    // -- Key event routing --------------------------------------------------

    fn handle_key_event(&mut self, key: KeyEvent) {
        // Ctrl-C always quits.
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c' | 'C'))
        {
            self.events.send(AppEvent::Quit);
            return;
        }

        match self.mode {
            AppMode::Normal => self.handle_normal_key(key),
            AppMode::Command => self.handle_command_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        if self.show_help {
            match key.code {
                KeyCode::Esc | KeyCode::Char('q' | '?') => self.show_help = false,
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                if self.nav.page() == Page::BlogDetail {
                    self.events.send(AppEvent::ClosePost);
                } else {
                    self.events.send(AppEvent::Quit);
                }
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_selection_down();
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_selection_up();
            }
            KeyCode::Enter => {
                self.open_selected();
            }
            KeyCode::Char('[') | KeyCode::Backspace => {
                self.events.send(AppEvent::HistoryBack);
            }
            KeyCode::Char(']') => {
                self.events.send(AppEvent::HistoryForward);
            }
            KeyCode::Char(c @ '1'..='4') => {
                let tab = Page::TABS[c as usize - '1' as usize];
                self.events.send(AppEvent::GoTo(tab));
            }
            KeyCode::Char('t') => {
                self.toggle_theme();
            }
            KeyCode::Char('?') => {
                self.show_help = true;
            }
            KeyCode::Char(':') => {
                self.mode = AppMode::Command;
                self.command_input.clear();
            }
            _ => {}
        }
    }

    fn handle_command_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.mode = AppMode::Normal;
                self.command_input.clear();
            }
            KeyCode::Enter => {
                self.execute_command();
                self.mode = AppMode::Normal;
            }
            KeyCode::Backspace => {
                self.command_input.pop();
            }
            KeyCode::Char(c) => {
                self.command_input.push(c);
            }
            _ => {}
        }
    }

    // -- Command execution --------------------------------------------------

    fn execute_command(&mut self) {
        let input = self.command_input.clone();
        match command::parse_command(&input) {
            Some(Command::Home) => self.events.send(AppEvent::GoTo(Page::Home)),
            Some(Command::Work) => self.events.send(AppEvent::GoTo(Page::Work)),
            Some(Command::Blog) => self.events.send(AppEvent::GoTo(Page::Blog)),
            Some(Command::Contact) => self.events.send(AppEvent::GoTo(Page::Contact)),
            Some(Command::Open(post_id)) => {
                self.events.send(AppEvent::OpenPost { post_id });
            }
            Some(Command::Location(query)) => {
                // A pasted location goes through the same transitions a key
                // press would, so history and fetches stay uniform.
                let state = NavigationState::from_query(&query);
                match state.selected_post_id {
                    Some(post_id) => self.events.send(AppEvent::OpenPost { post_id }),
                    None => self.events.send(AppEvent::GoTo(state.page)),
                }
            }
            Some(Command::Back) => self.events.send(AppEvent::HistoryBack),
            Some(Command::Forward) => self.events.send(AppEvent::HistoryForward),
            Some(Command::Theme) => self.toggle_theme(),
            Some(Command::Help) => self.show_help = true,
            Some(Command::Quit) => self.events.send(AppEvent::Quit),
            None => {
                self.status_message = Some(format!("Unknown command: {input}"));
            }
        }
        self.command_input.clear();
    }

    // -- Selection helpers --------------------------------------------------

    fn current_item_count(&self) -> usize {
        match self.nav.page() {
            Page::Work => projects::PROJECTS.len(),
            Page::Blog => self.posts.len(),
            Page::Contact => projects::CONTACT.len(),
            _ => 0,
        }
    }

    pub fn selected_index(&self) -> usize {
        match self.nav.page() {
            Page::Work => self.work_selected,
            Page::Blog => self.blog_selected,
            Page::Contact => self.contact_selected,
            _ => 0,
        }
    }

    fn move_selection_down(&mut self) {
        if self.nav.page() == Page::BlogDetail {
            self.detail_scroll = self.detail_scroll.saturating_add(1);
            return;
        }
        let count = self.current_item_count();
        let slot = match self.nav.page() {
            Page::Work => &mut self.work_selected,
            Page::Blog => &mut self.blog_selected,
            Page::Contact => &mut self.contact_selected,
            _ => return,
        };
        if *slot + 1 < count {
            *slot += 1;
            self.prefetch_selected();
        }
    }

    fn move_selection_up(&mut self) {
        if self.nav.page() == Page::BlogDetail {
            self.detail_scroll = self.detail_scroll.saturating_sub(1);
            return;
        }
        let slot = match self.nav.page() {
            Page::Work => &mut self.work_selected,
            Page::Blog => &mut self.blog_selected,
            Page::Contact => &mut self.contact_selected,
            _ => return,
        };
        if *slot > 0 {
            *slot -= 1;
            self.prefetch_selected();
        }
    }

    /// Moving the blog selection is the terminal analog of hovering a card:
    /// warm the content for the post under the cursor.
    fn prefetch_selected(&mut self) {
        if self.nav.page() != Page::Blog {
            return;
        }
        if let Some(post) = self.posts.get(self.blog_selected) {
            self.events.send(AppEvent::Prefetch {
                post_id: post.id.clone(),
            });
        }
    }

    fn open_selected(&mut self) {
        match self.nav.page() {
            Page::Blog => {
                if let Some(post) = self.posts.get(self.blog_selected) {
                    self.events.send(AppEvent::OpenPost {
                        post_id: post.id.clone(),
                    });
                }
            }
            Page::Work => {
                if let Some(project) = projects::PROJECTS.get(self.work_selected) {
                    self.open_url(project.url);
                }
            }
            Page::Contact => {
                if let Some(entry) = projects::CONTACT.get(self.contact_selected) {
                    self.open_url(entry.url);
                }
            }
            _ => {}
        }
    }

    fn open_url(&mut self, url: &str) {
        if let Err(err) = open::that(url) {
            self.status_message = Some(format!("Could not open {url}: {err}"));
        }
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.theme.persist(self.store.as_ref());
    }

    // -- App event handling -------------------------------------------------

    fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Quit => {
                self.running = false;
            }

            // Navigation: the location is re-serialized inside the navigator
            // before any fetch is triggered.
            AppEvent::GoTo(page) => {
                self.nav.go_to(page);
                self.after_navigation();
            }
            AppEvent::OpenPost { post_id } => {
                self.nav.open_post(&post_id);
                self.after_navigation();
            }
            AppEvent::ClosePost => {
                self.nav.close_post();
                self.after_navigation();
            }
            AppEvent::HistoryBack => {
                if self.nav.back() {
                    self.after_navigation();
                }
            }
            AppEvent::HistoryForward => {
                if self.nav.forward() {
                    self.after_navigation();
                }
            }

            // Resolution triggers -> dispatch to async tasks.
            AppEvent::ResolvePosts => self.dispatch_posts(),
            AppEvent::ResolveContent { post_id } => self.dispatch_content(post_id),
            AppEvent::Prefetch { post_id } => self.dispatch_prefetch(post_id),

            // Completions.
            AppEvent::PostsLoaded {
                posts,
                used_fallback,
            } => {
                self.posts_loading = false;
                self.used_fallback = used_fallback;
                self.posts = posts;
                if used_fallback {
                    self.status_message =
                        Some("content provider unreachable, showing built-in posts".to_string());
                }
                self.clamp_blog_selection();
            }
            AppEvent::ContentLoaded { post_id, blocks } => {
                // A completion for a post the user has since left is stale.
                if self.nav.page() != Page::BlogDetail
                    || self.nav.selected_post_id() != Some(post_id.as_str())
                {
                    tracing::debug!("discarding stale content for {post_id}");
                    return;
                }
                self.content_loading = false;
                self.blocks = blocks;
            }
        }
    }

    fn after_navigation(&mut self) {
        self.detail_scroll = 0;
        self.status_message = None;
        self.fetch_for_page();
    }

    /// Kick off the resolutions the current page needs. Loaders consult
    /// their caches first, so re-entering a page inside the reuse window
    /// costs nothing.
    fn fetch_for_page(&mut self) {
        match self.nav.page() {
            Page::Blog => {
                self.events.send(AppEvent::ResolvePosts);
            }
            Page::BlogDetail => {
                // The list is still needed behind the detail view (titles,
                // dates) and for returning to it.
                self.events.send(AppEvent::ResolvePosts);
                if let Some(post_id) = self.nav.selected_post_id() {
                    self.events.send(AppEvent::ResolveContent {
                        post_id: post_id.to_string(),
                    });
                }
            }
            _ => {}
        }
    }

    // -- Resolution dispatch ------------------------------------------------

    fn dispatch_posts(&mut self) {
        if self.posts_loading {
            return;
        }
        if let Some(posts) = self.service.posts_from_cache() {
            self.posts = posts;
            self.used_fallback = false;
            self.clamp_blog_selection();
            return;
        }

        self.posts_loading = true;
        let service = self.service.clone();
        let sender = self.events.sender();
        tokio::spawn(async move {
            let (posts, used_fallback) = service.fetch_posts().await;
            let _ = sender.send(Event::App(Box::new(AppEvent::PostsLoaded {
                posts,
                used_fallback,
            })));
        });
    }

    fn dispatch_content(&mut self, post_id: String) {
        // Local hits resolve synchronously and never enter the loading
        // state; only a real fetch shows the loading indicator.
        if let Some(blocks) = self.service.content_from_local(&post_id) {
            self.content_loading = false;
            self.blocks = blocks;
            return;
        }

        self.blocks.clear();
        self.content_loading = true;
        let service = self.service.clone();
        let sender = self.events.sender();
        tokio::spawn(async move {
            let blocks = service.fetch_content(&post_id).await;
            let _ = sender.send(Event::App(Box::new(AppEvent::ContentLoaded {
                post_id,
                blocks,
            })));
        });
    }

    fn dispatch_prefetch(&self, post_id: String) {
        let service = self.service.clone();
        tokio::spawn(async move {
            service.prefetch(&post_id).await;
        });
    }

    fn clamp_blog_selection(&mut self) {
        self.blog_selected = self.blog_selected.min(self.posts.len().saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::api::types::RichText;
    use crate::api::{ContentProvider, ProviderError};
    use crate::cache::TtlCache;
    use crate::content::content_key;
    use crate::store::MemoryStore;

    #[derive(Default)]
    struct QuietProvider {
        block_calls: AtomicUsize,
    }

    #[async_trait]
    impl ContentProvider for QuietProvider {
        async fn list_posts(&self) -> Result<Vec<PostSummary>, ProviderError> {
            Ok(vec![
                PostSummary {
                    id: "p1".into(),
                    title: "One".into(),
                    date: "Jan 2025".into(),
                    preview: String::new(),
                },
                PostSummary {
                    id: "p2".into(),
                    title: "Two".into(),
                    date: "Feb 2025".into(),
                    preview: String::new(),
                },
            ])
        }

        async fn post_blocks(&self, post_id: &str) -> Result<Vec<ContentBlock>, ProviderError> {
            self.block_calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![ContentBlock::Paragraph {
                id: "b1".into(),
                spans: vec![RichText::plain(format!("body of {post_id}"))],
            }])
        }
    }

    fn app_at(location: &str) -> App {
        let store = Arc::new(MemoryStore::new());
        let cache = TtlCache::new(Arc::clone(&store) as Arc<dyn KeyValueStore>);
        let service = ContentService::new(Arc::new(QuietProvider::default()), cache);
        App::new(service, store, location)
    }

    fn blocks_for(post_id: &str) -> Vec<ContentBlock> {
        vec![ContentBlock::Paragraph {
            id: "b1".into(),
            spans: vec![RichText::plain(format!("body of {post_id}"))],
        }]
    }

    #[tokio::test]
    async fn opening_a_post_serializes_the_location_first() {
        let mut app = app_at("");
        app.handle_app_event(AppEvent::OpenPost {
            post_id: "abc".into(),
        });
        // The location already reflects the transition even though no
        // completion has been processed yet.
        assert_eq!(app.nav.location(), "page=blogDetail&post=abc");
        assert_eq!(app.nav.page(), Page::BlogDetail);
    }

    #[tokio::test]
    async fn stale_content_completion_is_discarded() {
        let mut app = app_at("");
        app.handle_app_event(AppEvent::OpenPost {
            post_id: "p1".into(),
        });
        app.handle_app_event(AppEvent::ClosePost);

        app.handle_app_event(AppEvent::ContentLoaded {
            post_id: "p1".into(),
            blocks: blocks_for("p1"),
        });
        assert!(app.blocks.is_empty());
    }

    #[tokio::test]
    async fn completion_for_a_different_post_is_discarded() {
        let mut app = app_at("");
        app.handle_app_event(AppEvent::OpenPost {
            post_id: "p2".into(),
        });

        app.handle_app_event(AppEvent::ContentLoaded {
            post_id: "p1".into(),
            blocks: blocks_for("p1"),
        });
        assert!(app.blocks.is_empty());

        app.handle_app_event(AppEvent::ContentLoaded {
            post_id: "p2".into(),
            blocks: blocks_for("p2"),
        });
        assert_eq!(app.blocks, blocks_for("p2"));
        assert!(!app.content_loading);
    }

    #[tokio::test]
    async fn cached_content_resolves_without_entering_loading() {
        let store = Arc::new(MemoryStore::new());
        let cache = TtlCache::new(Arc::clone(&store) as Arc<dyn KeyValueStore>);
        cache.write(&content_key("p1"), &blocks_for("p1"));

        let service = ContentService::new(Arc::new(QuietProvider::default()), cache);
        let mut app = App::new(service, store, "");

        app.handle_app_event(AppEvent::OpenPost {
            post_id: "p1".into(),
        });
        app.handle_app_event(AppEvent::ResolveContent {
            post_id: "p1".into(),
        });

        assert!(!app.content_loading);
        assert_eq!(app.blocks, blocks_for("p1"));
    }

    #[tokio::test]
    async fn cache_miss_enters_loading_and_clears_old_blocks() {
        let mut app = app_at("");
        app.blocks = blocks_for("old");

        app.handle_app_event(AppEvent::OpenPost {
            post_id: "p1".into(),
        });
        app.handle_app_event(AppEvent::ResolveContent {
            post_id: "p1".into(),
        });

        assert!(app.content_loading);
        assert!(app.blocks.is_empty());
    }

    #[tokio::test]
    async fn posts_completion_commits_and_clamps_selection() {
        let mut app = app_at("?page=blog");
        app.blog_selected = 10;

        app.handle_app_event(AppEvent::PostsLoaded {
            posts: vec![PostSummary {
                id: "p1".into(),
                title: "One".into(),
                date: "Jan 2025".into(),
                preview: String::new(),
            }],
            used_fallback: false,
        });

        assert_eq!(app.posts.len(), 1);
        assert_eq!(app.blog_selected, 0);
        assert!(!app.posts_loading);
        assert!(app.status_message.is_none());
    }

    #[tokio::test]
    async fn fallback_posts_raise_a_status_message() {
        let mut app = app_at("?page=blog");
        app.handle_app_event(AppEvent::PostsLoaded {
            posts: crate::content::fallback_posts(),
            used_fallback: true,
        });
        assert!(app.used_fallback);
        assert!(app.status_message.is_some());
    }

    #[tokio::test]
    async fn history_keys_rederive_state_from_the_location() {
        let mut app = app_at("");
        app.handle_app_event(AppEvent::GoTo(Page::Blog));
        app.handle_app_event(AppEvent::OpenPost {
            post_id: "abc".into(),
        });

        app.handle_app_event(AppEvent::HistoryBack);
        assert_eq!(app.nav.page(), Page::Blog);
        assert_eq!(app.nav.selected_post_id(), None);

        app.handle_app_event(AppEvent::HistoryForward);
        assert_eq!(app.nav.page(), Page::BlogDetail);
        assert_eq!(app.nav.selected_post_id(), Some("abc"));
    }

    #[tokio::test]
    async fn theme_toggle_is_persisted() {
        let mut app = app_at("");
        assert!(!app.theme.dark);
        app.toggle_theme();
        assert!(app.theme.dark);
        assert_eq!(
            app.store.get("theme").unwrap().as_deref(),
            Some("dark")
        );
    }

    #[tokio::test]
    async fn unknown_command_sets_a_status_message() {
        let mut app = app_at("");
        app.command_input = "frobnicate".to_string();
        app.execute_command();
        assert_eq!(
            app.status_message.as_deref(),
            Some("Unknown command: frobnicate")
        );
    }

    #[tokio::test]
    async fn moving_the_blog_selection_requests_a_prefetch() {
        let mut app = app_at("?page=blog");
        app.posts = crate::content::fallback_posts();

        app.move_selection_down();
        assert_eq!(app.blog_selected, 1);

        // The prefetch trigger for the newly selected post is queued.
        let mut saw_prefetch = false;
        while let Ok(event) = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            app.events.next(),
        )
        .await
        {
            if let Ok(Event::App(app_event)) = event
                && let AppEvent::Prefetch { ref post_id } = *app_event
            {
                assert_eq!(post_id, "2");
                saw_prefetch = true;
                break;
            }
        }
        assert!(saw_prefetch);
    }
}
