//! Scene drawing and terminal output
//!
//! Every scene is drawn into a [`Canvas`] first and then written out in one
//! go, switching colour only when it changes between cells.

use std::io::Write;

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Color, Print},
};

use super::canvas::{Canvas, HUD_ROWS};
use crate::settings::GlyphSet;
use crate::sim::{
    Bullet, Cloud, Facing, GameState, Monster, Player, PlayerState, Rect, Shield, Showcase, Sky,
    Star,
};

// Colour palette
const C_SKY: Color = Color::DarkBlue;
const C_CLOUD: Color = Color::White;
const C_LANDMARK: Color = Color::Grey;
const C_PLAYER: Color = Color::Green;
const C_PLAYER_SHIELDED: Color = Color::Cyan;
const C_MONSTER: Color = Color::Red;
const C_MONSTER_ALT: Color = Color::Magenta;
const C_STAR: Color = Color::Yellow;
const C_SHIELD: Color = Color::Cyan;
const C_BULLET: Color = Color::White;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_BEST: Color = Color::DarkYellow;
const C_TITLE: Color = Color::Cyan;
const C_TEXT: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;

/// Sprite characters for one glyph set
#[derive(Debug, Clone, Copy)]
struct Glyphs {
    sky: char,
    cloud: char,
    player: char,
    player_shielded: char,
    face_left: char,
    face_right: char,
    /// Rising, falling
    feet: [char; 2],
    monster: [char; 4],
    star: [char; 2],
    shield: char,
    bullet: char,
}

impl Glyphs {
    fn for_set(set: GlyphSet) -> Self {
        match set {
            GlyphSet::Unicode => Self {
                sky: '·',
                cloud: '▒',
                player: '█',
                player_shielded: '▓',
                face_left: '◀',
                face_right: '▶',
                feet: ['↑', '↓'],
                monster: ['▼', '◆', '▲', '◆'],
                star: ['★', '✦'],
                shield: '◎',
                bullet: '•',
            },
            GlyphSet::Ascii => Self {
                sky: '.',
                cloud: '~',
                player: '#',
                player_shielded: 'O',
                face_left: '<',
                face_right: '>',
                feet: ['^', 'v'],
                monster: ['M', 'W', 'M', 'W'],
                star: ['*', '+'],
                shield: '@',
                bullet: '|',
            },
        }
    }
}

/// Draws game scenes for a terminal of a given size
#[derive(Debug, Clone)]
pub struct TerminalRenderer {
    glyphs: Glyphs,
    show_fps: bool,
    canvas: Canvas,
}

impl TerminalRenderer {
    pub fn new(glyph_set: GlyphSet, cols: u16, rows: u16, play_width: i32, play_height: i32) -> Self {
        Self {
            glyphs: Glyphs::for_set(glyph_set),
            show_fps: false,
            canvas: Canvas::new(cols, rows, play_width, play_height),
        }
    }

    pub fn set_show_fps(&mut self, show_fps: bool) {
        self.show_fps = show_fps;
    }

    /// Recreate the canvas after a terminal resize
    pub fn resize(&mut self, cols: u16, rows: u16, play_width: i32, play_height: i32) {
        if cols != self.canvas.cols() || rows != self.canvas.rows() {
            log::debug!("Terminal resized to {}x{}", cols, rows);
            self.canvas = Canvas::new(cols, rows, play_width, play_height);
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Running session with HUD
    pub fn draw_game(&mut self, state: &GameState, best: u64, fps: Option<f32>) {
        self.canvas.clear();
        self.draw_sky(&state.sky);
        for cloud in &state.clouds {
            self.draw_cloud(cloud);
        }
        self.draw_star(&state.star);
        self.draw_shield(&state.shield);
        self.draw_monster(&state.monster);
        for bullet in &state.bullets {
            self.draw_bullet(bullet);
        }
        self.draw_player(&state.player);

        let hud = format!("Score:{:>8}", state.score);
        self.canvas.text(1, 0, &hud, C_HUD_SCORE);
        let best = format!("Best:{:>8}", best.max(state.score));
        let col = self.canvas.cols() as i32 - best.chars().count() as i32 - 1;
        self.canvas.text(col, 0, &best, C_HUD_BEST);
        if state.shield_active {
            let elapsed = state.player.immunity_counter();
            let remaining = state.config.immunity_frames.saturating_sub(elapsed);
            let secs = remaining.div_ceil(state.config.fps.max(1));
            self.canvas
                .text_centered(0, &format!("SHIELD {:>2}s", secs), C_SHIELD);
        } else if let Some(fps) = fps.filter(|_| self.show_fps) {
            self.canvas
                .text_centered(0, &format!("{:.0} fps", fps), C_HINT);
        }
    }

    /// Attract screen with the animated showcase
    pub fn draw_title(&mut self, scene: &Showcase, best: u64) {
        self.canvas.clear();
        self.draw_showcase(scene);
        let row = self.canvas.row_for(80);
        self.canvas.text_centered(row, "C L O U D   J U M P E R", C_TITLE);
        if best > 0 {
            self.canvas
                .text_centered(row + 2, &format!("Best score: {}", best), C_HUD_SCORE);
        }
        let row = self.canvas.row_for(590);
        self.canvas
            .text_centered(row, "SPACE start   I instructions   ESC quit", C_HINT);
    }

    pub fn draw_instructions(&mut self) {
        self.canvas.clear();
        let lines: [(&str, Color); 10] = [
            ("HOW TO PLAY", C_TITLE),
            ("", C_TEXT),
            ("Bounce from cloud to cloud and climb as high as you can.", C_TEXT),
            ("LEFT / RIGHT  move (the screen wraps at the edges)", C_TEXT),
            ("SPACE         shoot the monster", C_TEXT),
            ("Stars are worth bonus points.", C_STAR),
            ("A shield makes you immune to the monster for a while.", C_SHIELD),
            ("Touching the monster or falling off the screen ends the game.", C_MONSTER),
            ("", C_TEXT),
            ("Press any key to go back", C_HINT),
        ];
        let top = (self.canvas.rows() as i32 - lines.len() as i32) / 2;
        for (i, (line, color)) in lines.iter().enumerate() {
            self.canvas.text_centered(top + i as i32, line, *color);
        }
    }

    /// Score screen shown after a session
    pub fn draw_score_screen(&mut self, scene: &Showcase, score: u64, best: u64, new_best: bool) {
        self.canvas.clear();
        self.draw_showcase(scene);
        let row = self.canvas.row_for(120);
        self.canvas.text_centered(row, "GAME OVER", C_MONSTER);
        self.canvas
            .text_centered(row + 2, &format!("Score: {}", score), C_HUD_SCORE);
        let best_line = if new_best {
            format!("New best score: {}!", best)
        } else {
            format!("Best score: {}", best)
        };
        self.canvas.text_centered(row + 3, &best_line, C_HUD_BEST);
        let row = self.canvas.row_for(600);
        self.canvas
            .text_centered(row, "SPACE play again   ESC quit", C_HINT);
    }

    /// Banner over a finished session, shown during the post-game pause
    pub fn draw_game_over_banner(&mut self) {
        let row = self.canvas.rows() as i32 / 2;
        self.canvas.text_centered(row, "  GAME OVER  ", C_MONSTER);
    }

    fn draw_showcase(&mut self, scene: &Showcase) {
        self.draw_cloud(&scene.cloud);
        if let Some(star) = &scene.star {
            self.draw_star(star);
        }
        if let Some(monster) = &scene.monster {
            self.draw_monster(monster);
        }
        self.draw_player(&scene.player);
    }

    fn draw_sky(&mut self, sky: &Sky) {
        // Sparse dots pinned to the sky so scrolling is visible
        let rows = self.canvas.rows() as i32;
        let cols = self.canvas.cols() as i32;
        let offset = self.canvas.row_for(sky.rect.top()) - HUD_ROWS as i32;
        for row in HUD_ROWS as i32..rows {
            let sky_row = row - offset;
            for col in 0..cols {
                if (col * 7 + sky_row * 13).rem_euclid(53) == 0 {
                    self.canvas.put(col, row, self.glyphs.sky, C_SKY);
                }
            }
        }
    }

    fn draw_cloud(&mut self, cloud: &Cloud) {
        let color = if cloud.is_landmark() { C_LANDMARK } else { C_CLOUD };
        self.canvas.fill(&cloud.rect, self.glyphs.cloud, color);
    }

    fn draw_player(&mut self, player: &Player) {
        let feet = match player.state() {
            PlayerState::Dead => return,
            PlayerState::Rising => self.glyphs.feet[0],
            PlayerState::Falling => self.glyphs.feet[1],
        };
        let sprite = player.sprite();
        let (body, color) = if sprite.shielded {
            (self.glyphs.player_shielded, C_PLAYER_SHIELDED)
        } else {
            (self.glyphs.player, C_PLAYER)
        };
        self.canvas.fill(&player.rect, body, color);

        let (col0, row0, col1, row1) = self.canvas.project(&player.rect);
        let (col, face) = match sprite.facing {
            Facing::Left => (col0, self.glyphs.face_left),
            Facing::Right => (col1 - 1, self.glyphs.face_right),
        };
        if row0 >= HUD_ROWS as i32 {
            self.canvas.put(col, row0, face, color);
        }
        let feet_row = row1 - 1;
        if feet_row > row0 && feet_row >= HUD_ROWS as i32 {
            self.canvas.put((col0 + col1) / 2, feet_row, feet, color);
        }
    }

    fn draw_monster(&mut self, monster: &Monster) {
        let frame = monster.frame() as usize % self.glyphs.monster.len();
        let color = if frame % 2 == 0 { C_MONSTER } else { C_MONSTER_ALT };
        self.canvas.fill(&monster.rect, self.glyphs.monster[frame], color);
    }

    fn draw_star(&mut self, star: &Star) {
        let glyph = self.glyphs.star[star.frame() as usize % 2];
        self.canvas.fill(&star.rect, glyph, C_STAR);
    }

    fn draw_shield(&mut self, shield: &Shield) {
        self.canvas.fill(&shield.rect, self.glyphs.shield, C_SHIELD);
    }

    fn draw_bullet(&mut self, bullet: &Bullet) {
        // Bullets are narrower than a cell; draw one cell at the centre
        let rect = Rect::new(bullet.rect.center_x(), bullet.rect.top(), 1, bullet.rect.height());
        self.canvas.fill(&rect, self.glyphs.bullet, C_BULLET);
    }

    /// Write the canvas to the terminal and flush
    pub fn present<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let mut current: Option<Color> = None;
        let cols = self.canvas.cols() as usize;
        for (row, line) in self.canvas.cells().chunks(cols).enumerate() {
            out.queue(cursor::MoveTo(0, row as u16))?;
            for cell in line {
                if current != Some(cell.color) {
                    out.queue(style::SetForegroundColor(cell.color))?;
                    current = Some(cell.color);
                }
                out.queue(Print(cell.ch))?;
            }
        }
        out.queue(style::ResetColor)?;
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn renderer(glyphs: GlyphSet) -> TerminalRenderer {
        TerminalRenderer::new(glyphs, 42, 33, 420, 640)
    }

    fn find(canvas: &Canvas, ch: char) -> bool {
        canvas.cells().iter().any(|cell| cell.ch == ch)
    }

    #[test]
    fn test_game_frame_shows_score_and_sprites() {
        let state = GameState::new(GameConfig::default(), 7);
        let mut renderer = renderer(GlyphSet::Ascii);
        renderer.draw_game(&state, 1200, None);
        let hud: String = renderer.canvas().cells()[..42].iter().map(|c| c.ch).collect();
        assert!(hud.contains("Score:"));
        assert!(hud.contains("1200"));
        assert!(find(renderer.canvas(), '#'));
        assert!(find(renderer.canvas(), '~'));
    }

    #[test]
    fn test_dead_player_not_drawn() {
        let mut state = GameState::new(GameConfig::default(), 7);
        state.player.kill();
        let mut renderer = renderer(GlyphSet::Ascii);
        renderer.draw_game(&state, 0, None);
        assert!(!find(renderer.canvas(), '#'));
    }

    #[test]
    fn test_feet_follow_vertical_motion() {
        let mut state = GameState::new(GameConfig::default(), 7);
        state.player.rect.set_left(200);
        state.player.rect.set_bottom(400);
        let mut renderer = renderer(GlyphSet::Ascii);
        let (col0, _, col1, row1) = renderer.canvas().project(&state.player.rect);
        let feet = ((col0 + col1) / 2) as u16;

        renderer.draw_game(&state, 0, None);
        assert_eq!(renderer.canvas().get(feet, (row1 - 1) as u16).map(|c| c.ch), Some('^'));

        state.player.vy = 5;
        renderer.draw_game(&state, 0, None);
        assert_eq!(renderer.canvas().get(feet, (row1 - 1) as u16).map(|c| c.ch), Some('v'));
    }

    #[test]
    fn test_title_scene_has_showcase() {
        let scene = Showcase::title(&GameConfig::default(), 1);
        let mut renderer = renderer(GlyphSet::Unicode);
        renderer.draw_title(&scene, 0);
        assert!(find(renderer.canvas(), '★'));
        assert!(find(renderer.canvas(), '▼'));
        assert!(find(renderer.canvas(), '▒'));
    }

    #[test]
    fn test_present_writes_every_row() {
        let mut renderer = TerminalRenderer::new(GlyphSet::Ascii, 10, 4, 420, 640);
        renderer.draw_instructions();
        let mut out = Vec::new();
        renderer.present(&mut out).unwrap();
        assert!(!out.is_empty());
    }

    #[test]
    fn test_resize_replaces_canvas() {
        let mut renderer = renderer(GlyphSet::Ascii);
        renderer.resize(80, 24, 420, 640);
        assert_eq!((renderer.canvas().cols(), renderer.canvas().rows()), (80, 24));
    }
}
