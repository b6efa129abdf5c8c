use super::{AppEvent, EventHandler, TerminalManager};
use crate::activity::{ActivityLog, LogLevel};
use crate::auth::AuthStore;
use crate::catalog::{mock, Song};
use crate::config::Config;
use crate::currency;
use crate::notifications::NotificationStore;
use crate::player::PlayerStore;
use crate::playlists::PlaylistStore;
use crate::purchases::PurchaseStore;
use crate::recommend::RecommendationStore;
use crate::search::{filter_songs, SearchFilters, SearchStore};
use anyhow::Result;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph},
    Frame,
};

const FAVORITES_PLAYLIST: &str = "Favorites";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Store,
    Library,
    Search,
    Playlists,
    Notifications,
}

const TABS: [Tab; 5] = [
    Tab::Store,
    Tab::Library,
    Tab::Search,
    Tab::Playlists,
    Tab::Notifications,
];

impl Tab {
    fn title(&self) -> &'static str {
        match self {
            Tab::Store => "Store",
            Tab::Library => "Library",
            Tab::Search => "Search",
            Tab::Playlists => "Playlists",
            Tab::Notifications => "Notifications",
        }
    }

    fn next(self) -> Self {
        let i = TABS.iter().position(|t| *t == self).unwrap_or(0);
        TABS[(i + 1) % TABS.len()]
    }

    fn previous(self) -> Self {
        let i = TABS.iter().position(|t| *t == self).unwrap_or(0);
        TABS[(i + TABS.len() - 1) % TABS.len()]
    }
}

pub struct App {
    config: Config,
    terminal: TerminalManager,
    event_handler: EventHandler,

    activity: ActivityLog,
    auth: AuthStore,
    player: PlayerStore,
    purchases: PurchaseStore,
    search: SearchStore,
    recommendations: RecommendationStore,
    playlists: PlaylistStore,
    notifications: NotificationStore,

    /// Approved catalog shown on the Store tab.
    storefront: Vec<Song>,
    tab: Tab,
    list_state: ListState,
    search_query: String,
    should_quit: bool,
}

impl App {
    pub async fn new(config: Config) -> Result<Self> {
        std::fs::create_dir_all(&config.data_dir)?;

        let terminal = TerminalManager::new()?;
        let event_handler = EventHandler::new();
        let latency = config.mock_latency();

        let auth = AuthStore::with_session_file(latency, config.data_dir.join("session.json"));
        let player = PlayerStore::with_snapshot(
            config.player.default_volume,
            config.data_dir.join("player.json"),
        )?;
        let playlists = PlaylistStore::with_dir(config.data_dir.join("playlists"))?;
        let purchases = PurchaseStore::new(latency, config.download_latency());
        let search = SearchStore::new(latency);
        let recommendations = RecommendationStore::new(latency);
        let notifications = NotificationStore::new(latency);

        let storefront = filter_songs(&mock::songs(), "", &SearchFilters::default());

        let mut activity = ActivityLog::new();
        activity.set_user(auth.user().map(|u| (u.id.clone(), u.email.clone())));

        let mut list_state = ListState::default();
        if !storefront.is_empty() {
            list_state.select(Some(0));
        }

        Ok(Self {
            config,
            terminal,
            event_handler,
            activity,
            auth,
            player,
            purchases,
            search,
            recommendations,
            playlists,
            notifications,
            storefront,
            tab: Tab::Store,
            list_state,
            search_query: String::new(),
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let sender = self.event_handler.sender();
        tokio::spawn(async move {
            let _ = EventHandler::forward_terminal_events(sender).await;
        });

        self.bootstrap().await;

        while !self.should_quit {
            self.render()?;

            if let Some(event) = self.event_handler.next_event().await {
                self.handle_event(event).await?;
            }
        }

        Ok(())
    }

    /// Initial fetches the pages would fire on mount.
    async fn bootstrap(&mut self) {
        if self.config.ui.show_notifications {
            if let Err(e) = self.notifications.fetch_notifications().await {
                self.activity.error(format!("Failed to fetch notifications: {}", e), &[]);
            }
        }
        if let Err(e) = self.recommendations.fetch_trending().await {
            self.activity.error(format!("Failed to fetch trending songs: {}", e), &[]);
        }
    }

    async fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::Quit => self.should_quit = true,
            AppEvent::NextTab => self.switch_tab(self.tab.next()),
            AppEvent::PreviousTab => self.switch_tab(self.tab.previous()),
            AppEvent::Up => self.move_selection(-1),
            AppEvent::Down => self.move_selection(1),
            AppEvent::Enter => self.activate_selection().await,
            AppEvent::Backspace => {
                if self.tab == Tab::Search {
                    self.search_query.pop();
                }
            }
            AppEvent::NextSong => self.player.play_next(),
            AppEvent::PreviousSong => self.player.play_previous(),
            AppEvent::Refresh => self.bootstrap().await,
            AppEvent::Char(c) => self.handle_char(c).await,
            AppEvent::Tick | AppEvent::Render => {}
        }

        Ok(())
    }

    async fn handle_char(&mut self, c: char) {
        // The search tab owns the keyboard while a query is being typed
        if self.tab == Tab::Search {
            self.search_query.push(c);
            return;
        }

        match c {
            'q' => self.should_quit = true,
            ' ' => {
                if self.player.current_song().is_some() {
                    let playing = self.player.is_playing();
                    self.player.set_is_playing(!playing);
                }
            }
            'n' => self.player.play_next(),
            'p' => self.player.play_previous(),
            'z' => {
                self.player.shuffle_queue();
                self.activity.info("Queue shuffled", &[]);
            }
            'l' => self.like_selection(),
            'b' => self.buy_selection().await,
            'd' => self.download_selection().await,
            'a' => self.add_selection_to_favorites(),
            'm' => {
                if self.tab == Tab::Notifications {
                    self.notifications.mark_all_as_read();
                }
            }
            'i' => self.sign_in_demo_user().await,
            'o' => self.sign_out().await,
            '+' | '=' => {
                let volume = self.player.volume();
                self.player.set_volume(volume + 0.1);
            }
            '-' => {
                let volume = self.player.volume();
                self.player.set_volume(volume - 0.1);
            }
            _ => {}
        }
    }

    fn switch_tab(&mut self, tab: Tab) {
        self.tab = tab;
        let len = self.current_list_len();
        self.list_state
            .select(if len > 0 { Some(0) } else { None });
    }

    fn current_list_len(&self) -> usize {
        match self.tab {
            Tab::Store => self.storefront.len(),
            Tab::Library => self.library_songs().len(),
            Tab::Search => self.search.results().len(),
            Tab::Playlists => self.playlists.list().len(),
            Tab::Notifications => self.notifications.notifications().len(),
        }
    }

    fn move_selection(&mut self, delta: i32) {
        let len = self.current_list_len();
        if len == 0 {
            return;
        }

        let current = self.list_state.selected().unwrap_or(0);
        let new_index = if delta < 0 {
            current.saturating_sub((-delta) as usize)
        } else {
            (current + delta as usize).min(len - 1)
        };

        self.list_state.select(Some(new_index));
    }

    fn library_songs(&self) -> Vec<Song> {
        self.storefront
            .iter()
            .filter(|s| self.purchases.has_purchased(&s.id))
            .cloned()
            .collect()
    }

    fn selected_song(&self) -> Option<Song> {
        let index = self.list_state.selected()?;
        match self.tab {
            Tab::Store => self.storefront.get(index).cloned(),
            Tab::Library => self.library_songs().get(index).cloned(),
            Tab::Search => self.search.results().get(index).cloned(),
            _ => None,
        }
    }

    async fn activate_selection(&mut self) {
        // Enter with a pending query runs the search; Enter on a result plays it
        if self.tab == Tab::Search && !self.search_query.is_empty() {
            let query = self.search_query.clone();
            self.search_query.clear();
            match self.search.search(&query, &SearchFilters::default()).await {
                Ok(()) => {
                    let len = self.search.results().len();
                    self.list_state.select(if len > 0 { Some(0) } else { None });
                }
                Err(e) => self.activity.error(format!("Search failed: {}", e), &[]),
            }
            return;
        }

        match self.tab {
            Tab::Store | Tab::Library | Tab::Search => {
                let queue = match self.tab {
                    Tab::Library => self.library_songs(),
                    Tab::Search => self.search.results().to_vec(),
                    _ => self.storefront.clone(),
                };
                if let Some(song) = self.selected_song() {
                    self.player.set_queue(queue);
                    self.player.set_current_song(Some(song));
                    self.player.set_is_playing(true);
                }
            }
            Tab::Playlists => {
                let Some(index) = self.list_state.selected() else {
                    return;
                };
                let Some(playlist) = self.playlists.list().get(index).map(|p| (*p).clone()) else {
                    return;
                };
                if let Some(first) = playlist.songs.first().cloned() {
                    self.player.set_queue(playlist.songs);
                    self.player.set_current_song(Some(first));
                    self.player.set_is_playing(true);
                }
            }
            Tab::Notifications => {
                let Some(index) = self.list_state.selected() else {
                    return;
                };
                if let Some(id) = self
                    .notifications
                    .notifications()
                    .get(index)
                    .map(|n| n.id.clone())
                {
                    self.notifications.mark_as_read(&id);
                }
            }
        }
    }

    fn like_selection(&mut self) {
        let song = self
            .selected_song()
            .or_else(|| self.player.current_song().cloned());
        if let Some(song) = song {
            self.player.toggle_like(&song.id);
            let state = if self.player.is_liked(&song.id) { "Liked" } else { "Unliked" };
            self.activity
                .info(format!("{} '{}'", state, song.title), &[("song_id", &song.id)]);
        }
    }

    async fn buy_selection(&mut self) {
        let Some(song) = self.selected_song() else {
            return;
        };
        if self.purchases.has_purchased(&song.id) {
            self.activity
                .info(format!("'{}' is already in your library", song.title), &[]);
            return;
        }

        let user = self.auth.user().cloned();
        match self.purchases.purchase_song(user.as_ref(), &song).await {
            Ok(purchase) => self.activity.info(
                format!(
                    "Purchased '{}' for {}",
                    song.title,
                    currency::format_price(purchase.amount, None)
                ),
                &[("song_id", &song.id)],
            ),
            Err(e) => self.activity.error(
                format!("Purchase failed: {}", e),
                &[("song_id", &song.id)],
            ),
        }
    }

    async fn download_selection(&mut self) {
        let Some(song) = self.selected_song() else {
            return;
        };
        if !self.purchases.has_purchased(&song.id) {
            self.activity
                .warn(format!("Buy '{}' before downloading it", song.title), &[]);
            return;
        }

        match self.purchases.download_song(&song.song_url, &song.title).await {
            Ok(()) => self
                .activity
                .info(format!("Downloaded '{}'", song.title), &[]),
            Err(e) => self
                .activity
                .error(format!("Download failed: {}", e), &[]),
        }
    }

    fn add_selection_to_favorites(&mut self) {
        let Some(song) = self.selected_song() else {
            return;
        };

        let user_id = self
            .auth
            .user()
            .map(|u| u.id.clone())
            .unwrap_or_else(|| "guest".to_string());

        let playlist_id = self
            .playlists
            .list()
            .iter()
            .find(|p| p.title == FAVORITES_PLAYLIST)
            .map(|p| p.id.clone());

        let result = match playlist_id {
            Some(id) => self.playlists.add_song(&id, song.clone()),
            None => {
                match self
                    .playlists
                    .create_playlist(&user_id, FAVORITES_PLAYLIST.to_string(), None)
                {
                    Ok(id) => self.playlists.add_song(&id, song.clone()),
                    Err(e) => Err(e),
                }
            }
        };

        match result {
            Ok(()) => self
                .activity
                .info(format!("Added '{}' to {}", song.title, FAVORITES_PLAYLIST), &[]),
            Err(e) => self
                .activity
                .error(format!("Could not update playlist: {}", e), &[]),
        }
    }

    async fn sign_in_demo_user(&mut self) {
        if self.auth.user().is_some() {
            return;
        }

        match self.auth.sign_in("john@example.com", "demo").await {
            Ok(user) => {
                self.activity
                    .set_user(Some((user.id.clone(), user.email.clone())));
                self.activity
                    .info(format!("Signed in as {}", user.full_name), &[]);
            }
            Err(e) => self.activity.error(format!("Sign-in failed: {}", e), &[]),
        }
    }

    async fn sign_out(&mut self) {
        if self.auth.user().is_none() {
            return;
        }

        match self.auth.sign_out().await {
            Ok(()) => {
                self.activity.set_user(None);
                self.activity.info("Signed out", &[]);
            }
            Err(e) => self.activity.error(format!("Sign-out failed: {}", e), &[]),
        }
    }

    fn current_list_lines(&self) -> Vec<String> {
        match self.tab {
            Tab::Store => self
                .storefront
                .iter()
                .map(|s| self.song_line(s, true))
                .collect(),
            Tab::Library => self
                .library_songs()
                .iter()
                .map(|s| self.song_line(s, false))
                .collect(),
            Tab::Search => self
                .search
                .results()
                .iter()
                .map(|s| self.song_line(s, true))
                .collect(),
            Tab::Playlists => self
                .playlists
                .list()
                .iter()
                .map(|p| {
                    format!(
                        "{} ({} song(s), {})",
                        p.title,
                        p.songs.len(),
                        p.duration_string()
                    )
                })
                .collect(),
            Tab::Notifications => self
                .notifications
                .notifications()
                .iter()
                .map(|n| {
                    let marker = if n.read { " " } else { "*" };
                    format!("{} {} - {}", marker, n.title, n.message)
                })
                .collect(),
        }
    }

    fn song_line(&self, song: &Song, with_price: bool) -> String {
        let playing = self
            .player
            .current_song()
            .map(|c| c.id == song.id)
            .unwrap_or(false);
        let marker = if playing { "> " } else { "  " };
        let liked = if self.player.is_liked(&song.id) { " <3" } else { "" };

        if with_price {
            let owned = if self.purchases.has_purchased(&song.id) {
                " [owned]"
            } else {
                ""
            };
            format!(
                "{}{} - {} ({}) {}{}{}",
                marker,
                song.display_artist(),
                song.title,
                song.duration_string(),
                currency::format_price(song.price, None),
                owned,
                liked
            )
        } else {
            format!(
                "{}{} - {} ({}){}",
                marker,
                song.display_artist(),
                song.title,
                song.duration_string(),
                liked
            )
        }
    }

    fn render(&mut self) -> Result<()> {
        let tab = self.tab;
        let lines = self.current_list_lines();
        let search_query = self.search_query.clone();
        let trending = self
            .recommendations
            .trending()
            .iter()
            .map(|s| s.title.clone())
            .collect::<Vec<_>>()
            .join(", ");
        let unread = self.notifications.unread_count();
        let user_label = self
            .auth
            .user()
            .map(|u| u.full_name.clone())
            .unwrap_or_else(|| "guest (press 'i' to sign in)".to_string());

        let now_playing = match self.player.current_song() {
            Some(song) => format!("{} - {}", song.display_artist(), song.title),
            None => "Nothing playing".to_string(),
        };
        let state_text = if self.player.current_song().is_none() {
            "stopped"
        } else if self.player.is_playing() {
            "playing"
        } else {
            "paused"
        };
        let volume = self.player.volume();

        let banner = self
            .activity
            .latest()
            .map(|e| (e.level, e.message.clone()));

        let mut list_state = self.list_state.clone();
        self.terminal.draw(|f| {
            Self::render_ui(
                f,
                tab,
                &lines,
                &mut list_state,
                &search_query,
                &trending,
                unread,
                &user_label,
                &now_playing,
                state_text,
                volume,
                banner.as_ref(),
            );
        })?;
        self.list_state = list_state;

        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn render_ui(
        f: &mut Frame,
        tab: Tab,
        lines: &[String],
        list_state: &mut ListState,
        search_query: &str,
        trending: &str,
        unread: usize,
        user_label: &str,
        now_playing: &str,
        state_text: &str,
        volume: f32,
        banner: Option<&(LogLevel, String)>,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header / tabs
                Constraint::Min(0),    // Main content
                Constraint::Length(3), // Player bar
                Constraint::Length(1), // Banner
            ])
            .split(f.area());

        Self::render_header(f, chunks[0], tab, unread, user_label);
        Self::render_content(f, chunks[1], tab, lines, list_state, search_query, trending);
        Self::render_player_bar(f, chunks[2], now_playing, state_text, volume);
        Self::render_banner(f, chunks[3], banner);
    }

    fn render_header(f: &mut Frame, area: Rect, tab: Tab, unread: usize, user_label: &str) {
        let tabs: Vec<String> = TABS
            .iter()
            .map(|t| {
                let label = if *t == Tab::Notifications && unread > 0 {
                    format!("{} ({})", t.title(), unread)
                } else {
                    t.title().to_string()
                };
                if *t == tab {
                    format!("[{}]", label)
                } else {
                    format!(" {} ", label)
                }
            })
            .collect();

        let header = Paragraph::new(format!("tunestall  {}  |  {}", tabs.join(" "), user_label))
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::ALL));

        f.render_widget(header, area);
    }

    fn render_content(
        f: &mut Frame,
        area: Rect,
        tab: Tab,
        lines: &[String],
        list_state: &mut ListState,
        search_query: &str,
        trending: &str,
    ) {
        let list_area = match tab {
            Tab::Search => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(3), Constraint::Min(0)])
                    .split(area);

                let input = Paragraph::new(search_query.to_string())
                    .block(Block::default().borders(Borders::ALL).title("Query (Enter to search)"));
                f.render_widget(input, chunks[0]);
                chunks[1]
            }
            Tab::Store if !trending.is_empty() => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(3), Constraint::Min(0)])
                    .split(area);

                let feed = Paragraph::new(trending.to_string())
                    .block(Block::default().borders(Borders::ALL).title("Trending"));
                f.render_widget(feed, chunks[0]);
                chunks[1]
            }
            _ => area,
        };

        let items: Vec<ListItem> = lines.iter().map(|l| ListItem::new(l.as_str())).collect();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(tab.title()))
            .highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("> ");

        f.render_stateful_widget(list, list_area, list_state);
    }

    fn render_player_bar(
        f: &mut Frame,
        area: Rect,
        now_playing: &str,
        state_text: &str,
        volume: f32,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(60),
                Constraint::Percentage(20),
                Constraint::Percentage(20),
            ])
            .split(area);

        let info = Paragraph::new(now_playing.to_string())
            .block(Block::default().borders(Borders::ALL).title("Now Playing"));
        f.render_widget(info, chunks[0]);

        let volume_widget = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title("Volume"))
            .gauge_style(Style::default().fg(Color::Green))
            .ratio(volume as f64);
        f.render_widget(volume_widget, chunks[1]);

        let status = Paragraph::new(state_text.to_string())
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(status, chunks[2]);
    }

    fn render_banner(f: &mut Frame, area: Rect, banner: Option<&(LogLevel, String)>) {
        let Some((level, message)) = banner else {
            return;
        };

        let style = match level {
            LogLevel::Info => Style::default().fg(Color::Green),
            LogLevel::Warn => Style::default().fg(Color::Yellow),
            LogLevel::Error => Style::default().fg(Color::Red),
        };

        f.render_widget(Paragraph::new(message.as_str()).style(style), area);
    }
}
