//! Central application state for the TUI. Every event handler is a thin
//! dispatch into the record store; the only state owned here is which screen
//! is visible, which modal is open, and the footer message. The store never
//! learns anything about the UI.

use std::mem;
use std::path::PathBuf;

use anyhow::Result;
use crossterm::event::KeyCode;
use open::that as open_media;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::models::Song;
use crate::store::Library;

use super::forms::{ConfirmSongDelete, PlaylistForm, SongField, SongForm};
use super::helpers::{centered_rect, song_detail_lines, surface_error};
use super::screens::{PlaylistScreen, SongListScreen, TablesScreen};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;

/// High-level navigation states. Keeping this explicit makes it easy to
/// reason about which rendering path runs and what keyboard shortcuts do.
enum Screen {
    Songs(SongListScreen),
    Playlists(PlaylistScreen),
    Tables(TablesScreen),
}

/// Fine-grained modes scoped to the current screen.
enum Mode {
    Normal,
    AddingSong(SongForm),
    EditingSong { id: i64, form: SongForm },
    ConfirmDelete(ConfirmSongDelete),
    AssigningPlaylist(PlaylistForm),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI.
pub struct App {
    library: Library,
    data_path: PathBuf,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
    /// Set by every catalog mutation, cleared by save. Only used to show
    /// the unsaved-changes marker; saving stays an explicit user action.
    dirty: bool,
}

impl App {
    pub fn new(library: Library, data_path: PathBuf) -> Self {
        let songs = library.songs();
        Self {
            library,
            data_path,
            screen: Screen::Songs(SongListScreen::new(songs)),
            mode: Mode::Normal,
            status: None,
            dirty: false,
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mut mode = mem::replace(&mut self.mode, Mode::Normal);

        mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::AddingSong(form) => self.handle_add_song(code, form)?,
            Mode::EditingSong { id, form } => self.handle_edit_song(code, id, form)?,
            Mode::ConfirmDelete(confirm) => self.handle_confirm_delete(code, confirm)?,
            Mode::AssigningPlaylist(form) => self.handle_assign_playlist(code, form)?,
        };

        self.mode = mode;
        Ok(exit)
    }

    /// Ctrl+S saves from any screen or modal without touching the mode.
    pub(crate) fn handle_ctrl_s(&mut self) {
        self.save_catalog();
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match self.screen {
            Screen::Songs(_) => self.handle_songs_key(code, exit),
            Screen::Playlists(_) => self.handle_playlists_key(code, exit),
            Screen::Tables(_) => self.handle_tables_key(code, exit),
        }
    }

    fn handle_songs_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        let mut status_to_set: Option<(String, StatusKind)> = None;

        if let Screen::Songs(ref mut songs) = self.screen {
            match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    *exit = true;
                }
                KeyCode::Up => songs.move_selection(-1),
                KeyCode::Down => songs.move_selection(1),
                KeyCode::PageUp => songs.move_selection(-5),
                KeyCode::PageDown => songs.move_selection(5),
                KeyCode::Home => songs.select_first(),
                KeyCode::End => songs.select_last(),
                KeyCode::Enter => {
                    status_to_set = songs.current_song().cloned().map(play_song);
                }
                KeyCode::Char('+') => {
                    self.clear_status();
                    return Ok(Mode::AddingSong(SongForm::default()));
                }
                KeyCode::Char('e') | KeyCode::Char('E') => {
                    if let Some(song) = songs.current_song() {
                        let id = song.id;
                        let form = SongForm::from_song(song);
                        self.clear_status();
                        return Ok(Mode::EditingSong { id, form });
                    }
                    status_to_set =
                        Some(("No song selected to edit.".to_string(), StatusKind::Error));
                }
                KeyCode::Char('-') => {
                    if let Some(song) = songs.current_song().cloned() {
                        self.clear_status();
                        return Ok(Mode::ConfirmDelete(ConfirmSongDelete::from(song)));
                    }
                    status_to_set =
                        Some(("No song selected to delete.".to_string(), StatusKind::Error));
                }
                KeyCode::Char('a') | KeyCode::Char('A') => {
                    if let Some(song) = songs.current_song() {
                        let form = PlaylistForm::for_song(song.id);
                        self.clear_status();
                        return Ok(Mode::AssigningPlaylist(form));
                    }
                    status_to_set =
                        Some(("No song selected to assign.".to_string(), StatusKind::Error));
                }
                KeyCode::Char('s') | KeyCode::Char('S') => {
                    self.save_catalog();
                }
                KeyCode::Char('p') | KeyCode::Char('P') => {
                    self.clear_status();
                    self.screen = Screen::Playlists(PlaylistScreen::load(&self.library));
                }
                KeyCode::Char('t') | KeyCode::Char('T') => {
                    self.clear_status();
                    self.screen = Screen::Tables(TablesScreen::load(&self.library));
                }
                _ => {}
            }
        }

        if let Some((text, kind)) = status_to_set {
            self.set_status(text, kind);
        }
        Ok(Mode::Normal)
    }

    fn handle_playlists_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        let mut status_to_set: Option<(String, StatusKind)> = None;
        let mut back_to_songs = false;
        let mut save_requested = false;
        let mut open_tables = false;
        // (playlist_id, song_id, label) of the membership to drop; resolved
        // while the screen is borrowed, applied afterwards.
        let mut removal: Option<(i64, i64, String)> = None;

        if let Screen::Playlists(ref mut playlists) = self.screen {
            match code {
                KeyCode::Char('q') => {
                    *exit = true;
                }
                KeyCode::Esc | KeyCode::Char('p') | KeyCode::Char('P') => {
                    back_to_songs = true;
                }
                KeyCode::Left => playlists.move_playlist(&self.library, -1),
                KeyCode::Right => playlists.move_playlist(&self.library, 1),
                KeyCode::Up => playlists.move_song(-1),
                KeyCode::Down => playlists.move_song(1),
                KeyCode::Enter => {
                    status_to_set = playlists.current_song().cloned().map(play_song);
                }
                KeyCode::Char('-') => {
                    removal = playlists.current_playlist().and_then(|playlist_id| {
                        playlists
                            .current_song()
                            .map(|song| (playlist_id, song.id, song.display_label()))
                    });
                    if removal.is_none() {
                        status_to_set = Some((
                            "No playlist song selected.".to_string(),
                            StatusKind::Error,
                        ));
                    }
                }
                KeyCode::Char('s') | KeyCode::Char('S') => {
                    save_requested = true;
                }
                KeyCode::Char('t') | KeyCode::Char('T') => {
                    open_tables = true;
                }
                _ => {}
            }
        }

        if let Some((playlist_id, song_id, label)) = removal {
            if self.library.remove_song_from_playlist(playlist_id, song_id) {
                self.dirty = true;
                status_to_set = Some((
                    format!("Removed {label} from playlist {playlist_id}."),
                    StatusKind::Info,
                ));
            } else {
                status_to_set = Some((
                    "Song is not in this playlist.".to_string(),
                    StatusKind::Error,
                ));
            }
            if let Screen::Playlists(ref mut playlists) = self.screen {
                playlists.refresh(&self.library);
            }
        }

        if save_requested {
            self.save_catalog();
        } else if open_tables {
            self.clear_status();
            self.screen = Screen::Tables(TablesScreen::load(&self.library));
        } else if back_to_songs {
            self.clear_status();
            self.open_song_browser(None);
        }
        if let Some((text, kind)) = status_to_set {
            self.set_status(text, kind);
        }
        Ok(Mode::Normal)
    }

    fn handle_tables_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        let mut back_to_songs = false;

        if let Screen::Tables(ref mut tables) = self.screen {
            match code {
                KeyCode::Char('q') => {
                    *exit = true;
                }
                KeyCode::Esc | KeyCode::Char('t') | KeyCode::Char('T') => {
                    back_to_songs = true;
                }
                KeyCode::Up => tables.scroll(-1),
                KeyCode::Down => tables.scroll(1),
                KeyCode::PageUp => tables.scroll(-10),
                KeyCode::PageDown => tables.scroll(10),
                _ => {}
            }
        }

        if back_to_songs {
            self.clear_status();
            self.open_song_browser(None);
        }
        Ok(Mode::Normal)
    }

    fn handle_add_song(&mut self, code: KeyCode, mut form: SongForm) -> Result<Mode> {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Add song cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Tab => form.next_field(),
            KeyCode::BackTab => form.previous_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match form.parse_inputs() {
                Ok(song) => {
                    let id = self.library.add_song(song);
                    self.dirty = true;
                    self.open_song_browser(Some(id));
                    self.set_status(format!("Added song {id}."), StatusKind::Info);
                    keep_open = false;
                }
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Ok(Mode::AddingSong(form))
        } else {
            Ok(Mode::Normal)
        }
    }

    fn handle_edit_song(&mut self, code: KeyCode, id: i64, mut form: SongForm) -> Result<Mode> {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Edit cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Tab => form.next_field(),
            KeyCode::BackTab => form.previous_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match form.parse_inputs() {
                Ok(replacement) => {
                    if self.library.update_song(id, &replacement) {
                        self.dirty = true;
                        self.open_song_browser(Some(id));
                        self.set_status(format!("Updated song {id}."), StatusKind::Info);
                    } else {
                        self.set_status(
                            format!("Song {id} no longer exists."),
                            StatusKind::Error,
                        );
                    }
                    keep_open = false;
                }
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Ok(Mode::EditingSong { id, form })
        } else {
            Ok(Mode::Normal)
        }
    }

    fn handle_confirm_delete(
        &mut self,
        code: KeyCode,
        confirm: ConfirmSongDelete,
    ) -> Result<Mode> {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Deletion cancelled.", StatusKind::Info);
                Ok(Mode::Normal)
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                let id = confirm.song.id;
                if self.library.delete_song(id) {
                    self.dirty = true;
                    self.open_song_browser(None);
                    self.set_status(format!("Deleted song {id}."), StatusKind::Info);
                } else {
                    self.set_status(format!("Song {id} no longer exists."), StatusKind::Error);
                }
                Ok(Mode::Normal)
            }
            _ => Ok(Mode::ConfirmDelete(confirm)),
        }
    }

    fn handle_assign_playlist(&mut self, code: KeyCode, mut form: PlaylistForm) -> Result<Mode> {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Assign cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match form.parse_inputs() {
                Ok(playlist_id) => {
                    if self.library.add_song_to_playlist(playlist_id, form.song_id) {
                        self.dirty = true;
                        self.set_status(
                            format!("Song {} added to playlist {playlist_id}.", form.song_id),
                            StatusKind::Info,
                        );
                    } else {
                        self.set_status(
                            format!("Song {} no longer exists.", form.song_id),
                            StatusKind::Error,
                        );
                    }
                    keep_open = false;
                }
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Ok(Mode::AssigningPlaylist(form))
        } else {
            Ok(Mode::Normal)
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match &self.screen {
            Screen::Songs(songs) => self.draw_song_browser(frame, content_area, songs),
            Screen::Playlists(playlists) => self.draw_playlists(frame, content_area, playlists),
            Screen::Tables(tables) => self.draw_tables(frame, content_area, tables),
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::AddingSong(form) => self.draw_song_form(frame, area, "Add Song", form),
            Mode::EditingSong { form, .. } => self.draw_song_form(frame, area, "Edit Song", form),
            Mode::ConfirmDelete(confirm) => self.draw_confirm_delete(frame, area, confirm),
            Mode::AssigningPlaylist(form) => self.draw_playlist_form(frame, area, form),
            Mode::Normal => {}
        }
    }

    fn draw_song_browser(&self, frame: &mut Frame, area: Rect, songs: &SongListScreen) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(area);

        let items: Vec<ListItem> = songs
            .songs
            .iter()
            .map(|song| ListItem::new(format!("{:>4}  {}", song.id, song.display_label())))
            .collect();
        let count = items.len();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Songs ({count})")),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        let mut state = ListState::default();
        if count > 0 {
            state.select(Some(songs.selected));
        }
        frame.render_stateful_widget(list, chunks[0], &mut state);

        let detail_block = Block::default().borders(Borders::ALL).title("Details");
        let detail_lines = match songs.current_song() {
            Some(song) => song_detail_lines(song),
            None => vec![Line::from(Span::styled(
                "The catalog is empty. Press + to add a song.",
                Style::default().fg(Color::DarkGray),
            ))],
        };
        let paragraph = Paragraph::new(detail_lines)
            .block(detail_block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, chunks[1]);
    }

    fn draw_playlists(&self, frame: &mut Frame, area: Rect, playlists: &PlaylistScreen) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(18), Constraint::Min(0)])
            .split(area);

        let playlist_items: Vec<ListItem> = playlists
            .playlists
            .iter()
            .map(|id| ListItem::new(format!("Playlist {id}")))
            .collect();
        let playlist_count = playlist_items.len();
        let playlist_list = List::new(playlist_items)
            .block(Block::default().borders(Borders::ALL).title("Playlists"))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        let mut playlist_state = ListState::default();
        if playlist_count > 0 {
            playlist_state.select(Some(playlists.selected_playlist));
        }
        frame.render_stateful_widget(playlist_list, chunks[0], &mut playlist_state);

        let song_items: Vec<ListItem> = playlists
            .songs
            .iter()
            .map(|song| ListItem::new(format!("{:>4}  {}", song.id, song.display_label())))
            .collect();
        let song_count = song_items.len();
        let title = match playlists.current_playlist() {
            Some(id) => format!("Songs in playlist {id}"),
            None => "No playlists yet".to_string(),
        };
        let song_list = List::new(song_items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        let mut song_state = ListState::default();
        if song_count > 0 {
            song_state.select(Some(playlists.selected_song));
        }
        frame.render_stateful_widget(song_list, chunks[1], &mut song_state);
    }

    fn draw_tables(&self, frame: &mut Frame, area: Rect, tables: &TablesScreen) {
        let block = Block::default().borders(Borders::ALL).title("Tables");
        let inner_height = block.inner(area).height as usize;
        let visible: Vec<Line> = tables
            .lines
            .iter()
            .skip(tables.offset)
            .take(inner_height.max(1))
            .map(|line| Line::from(line.clone()))
            .collect();
        let paragraph = Paragraph::new(visible).block(block);
        frame.render_widget(paragraph, area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else if self.dirty {
            Line::from(Span::styled(
                "Unsaved changes. Press S to save.",
                Style::default().fg(Color::Yellow),
            ))
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let pair = |key: &str, action: &str| {
            vec![
                Span::styled(key.to_string(), key_style),
                Span::raw(format!(" {action}   ")),
            ]
        };
        match (&self.screen, &self.mode) {
            (_, Mode::ConfirmDelete(_)) => Line::from(
                [pair("[Y]", "Delete"), pair("[N/Esc]", "Cancel")].concat(),
            ),
            (_, Mode::AddingSong(_)) | (_, Mode::EditingSong { .. }) => Line::from(
                [
                    pair("[Enter]", "Save"),
                    pair("[Tab]", "Next Field"),
                    pair("[Esc]", "Cancel"),
                ]
                .concat(),
            ),
            (_, Mode::AssigningPlaylist(_)) => Line::from(
                [pair("[Enter]", "Assign"), pair("[Esc]", "Cancel")].concat(),
            ),
            (Screen::Songs(_), _) => Line::from(
                [
                    pair("[+]", "Add"),
                    pair("[E]", "Edit"),
                    pair("[-]", "Delete"),
                    pair("[A]", "Playlist"),
                    pair("[Enter]", "Play"),
                    pair("[S]", "Save"),
                    pair("[P]", "Playlists"),
                    pair("[T]", "Tables"),
                    pair("[Q]", "Quit"),
                ]
                .concat(),
            ),
            (Screen::Playlists(_), _) => Line::from(
                [
                    pair("[←→]", "Playlist"),
                    pair("[↑↓]", "Song"),
                    pair("[-]", "Remove"),
                    pair("[Enter]", "Play"),
                    pair("[S]", "Save"),
                    pair("[Esc]", "Back"),
                ]
                .concat(),
            ),
            (Screen::Tables(_), _) => Line::from(
                [pair("[↑↓]", "Scroll"), pair("[Esc]", "Back")].concat(),
            ),
        }
    }

    fn draw_song_form(&self, frame: &mut Frame, area: Rect, title: &str, form: &SongForm) {
        let popup_area = centered_rect(70, 60, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(title.to_string()).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines: Vec<Line> = SongField::ALL
            .iter()
            .map(|field| form.build_line(*field))
            .collect();
        lines.push(Line::from(""));

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to save, Tab to switch, Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let prefix = format!("{}: ", form.active.label()).len() as u16;
        let cursor_x = inner.x + prefix + form.active_len() as u16;
        let cursor_y = inner.y + form.active.row() as u16;
        frame.set_cursor_position((cursor_x, cursor_y));
    }

    fn draw_playlist_form(&self, frame: &mut Frame, area: Rect, form: &PlaylistForm) {
        let popup_area = centered_rect(50, 25, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Add To Playlist")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![Line::from(format!("Playlist number: {}", form.number))];
        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        }
        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let cursor_x = inner.x + "Playlist number: ".len() as u16 + form.number.len() as u16;
        frame.set_cursor_position((cursor_x, inner.y));
    }

    fn draw_confirm_delete(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmSongDelete) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Confirm Deletion")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(format!(
                "Delete song {} ({})?",
                confirm.song.id,
                confirm.song.display_label()
            )),
            Line::from("The song is removed from every playlist as well."),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    /// Snap the UI back to the song browser with a fresh snapshot,
    /// optionally focusing a particular id.
    fn open_song_browser(&mut self, focus_id: Option<i64>) {
        let songs = self.library.songs();
        if let Screen::Songs(ref mut screen) = self.screen {
            screen.set_songs(songs);
        } else {
            self.screen = Screen::Songs(SongListScreen::new(songs));
        }
        if let (Screen::Songs(ref mut screen), Some(id)) = (&mut self.screen, focus_id) {
            screen.focus_id(id);
        }
    }

    fn save_catalog(&mut self) {
        match self.library.save(&self.data_path) {
            Ok(()) => {
                self.dirty = false;
                self.set_status(
                    format!("Saved {} songs.", self.library.song_count()),
                    StatusKind::Info,
                );
            }
            Err(err) => {
                let err = anyhow::Error::new(err);
                self.set_status(surface_error(&err), StatusKind::Error);
            }
        }
    }
}

/// Hand the song's media file to the operating system's default player.
/// Returns the footer message describing the outcome.
fn play_song(song: Song) -> (String, StatusKind) {
    let filename = song.filename.trim().to_string();
    if filename.is_empty() {
        return (
            "This song does not have a filename.".to_string(),
            StatusKind::Error,
        );
    }
    match open_media(&filename) {
        Ok(()) => (format!("Playing {}.", song.display_label()), StatusKind::Info),
        Err(err) => (format!("Failed to play: {err}"), StatusKind::Error),
    }
}
