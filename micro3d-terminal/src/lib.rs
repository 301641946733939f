/// Terminal host for the micro3d rasterizer: frame clock, input and resize
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use micro3d_core::{draw_frame, Camera, Color, CubePose, DisplaySink, DrawMode, FrameBuffer, Spin, Transform};
use std::io::{self, stdout, Stdout, Write};
use std::time::{Duration, Instant};

pub mod sink;

pub use sink::TerminalSink;

/// Rows reserved above the picture for the status line
const STATUS_ROWS: u16 = 1;

/// Host settings
#[derive(Debug, Clone, Copy)]
pub struct AppConfig {
    pub target_fps: u32,
    /// Radians per second
    pub spin_speed: f32,
    pub mode: DrawMode,
    pub background: Color,
    pub pose: CubePose,
}

impl AppConfig {
    pub fn with_mode(mut self, mode: DrawMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_spin_speed(mut self, spin_speed: f32) -> Self {
        self.spin_speed = spin_speed;
        self
    }

    fn frame_time(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.target_fps.max(1) as f64)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            spin_speed: 1.0,
            mode: DrawMode::Filled,
            background: Color::LIGHT_GREY,
            pose: CubePose::default(),
        }
    }
}

/// Owns everything that outlives a frame: the pixels, the sink, the camera
/// and the spin angle the next frame is built from.
pub struct TerminalApp {
    config: AppConfig,
    frame: FrameBuffer,
    sink: TerminalSink<Stdout>,
    camera: Camera,
    spin: Spin,
    paused: bool,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(config: AppConfig) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        let (width, height) = TerminalSink::<Stdout>::pixels_for(cols, rows, STATUS_ROWS);
        log::info!("terminal {}x{} cells, frame {}x{} pixels", cols, rows, width, height);

        let camera = checked_camera(Camera::new(width, height))?;

        Ok(Self {
            config,
            frame: FrameBuffer::new(width, height),
            sink: TerminalSink::new(stdout(), width, height, STATUS_ROWS),
            camera,
            spin: Spin::default(),
            paused: false,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = self.config.frame_time();
        let mut previous = Instant::now();

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?)?;
            }

            // Update
            self.update(frame_start.duration_since(previous));
            previous = frame_start;

            // Render
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            } else {
                log::trace!("frame overran budget: {:?}", elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> io::Result<()> {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Resize(cols, rows) => self.resize(cols, rows)?,
            _ => {}
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Char('m') | KeyCode::Char(' ') => {
                self.config.mode = self.config.mode.next();
                log::info!("draw mode: {}", self.config.mode);
            }
            KeyCode::Char('p') => {
                self.paused = !self.paused;
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.config.spin_speed += 0.25;
            }
            KeyCode::Char('-') => {
                self.config.spin_speed -= 0.25;
            }
            _ => {}
        }
    }

    fn resize(&mut self, cols: u16, rows: u16) -> io::Result<()> {
        let (width, height) = TerminalSink::<Stdout>::pixels_for(cols, rows, STATUS_ROWS);
        self.frame.resize(width, height);
        self.camera.set_viewport(width, height);
        self.sink.resize(width, height)?;
        let out = self.sink.writer();
        execute!(out, terminal::Clear(ClearType::All))
    }

    fn update(&mut self, dt: Duration) {
        if !self.paused {
            self.spin.advance(self.config.spin_speed * dt.as_secs_f32());
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let transform = Transform::for_frame(self.spin.angle, &self.config.pose, &self.camera);

        self.frame.clear(self.config.background);
        draw_frame(&mut self.frame.device(), self.config.mode, &transform);
        self.sink.present(&self.frame)?;

        // Draw UI overlay
        let out = self.sink.writer();
        queue!(
            out,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(TermColor::Yellow),
            Print(format!(
                "micro3d | {} | FPS: {:.1} | spin {:+.2} rad/s{} | M=Mode P=Pause +/-=Speed Q=Quit",
                self.config.mode,
                self.fps,
                self.config.spin_speed,
                if self.paused { " (paused)" } else { "" }
            )),
            ResetColor
        )?;

        out.flush()?;
        Ok(())
    }
}

/// Refuse a camera that cannot produce a view before the screen is taken over.
fn checked_camera(camera: Camera) -> io::Result<Camera> {
    camera
        .validate()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    Ok(camera)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_runs_at_sixty_hertz() {
        let config = AppConfig::default();
        assert_eq!(config.target_fps, 60);
        assert_eq!(config.background, Color::LIGHT_GREY);
        let ms = config.frame_time().as_secs_f64() * 1000.0;
        assert!((ms - 16.666).abs() < 0.01);
    }

    #[test]
    fn zero_fps_does_not_divide_by_zero() {
        let config = AppConfig {
            target_fps: 0,
            ..AppConfig::default()
        };
        assert_eq!(config.frame_time(), Duration::from_secs(1));
    }

    #[test]
    fn unusable_camera_is_rejected() {
        let camera = Camera::new(80, 46);
        assert!(checked_camera(camera).is_ok());

        let err = checked_camera(camera.with_fov(0.0)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        let err = checked_camera(camera.with_target(camera.eye)).unwrap_err();
        assert!(err.to_string().contains("forward"));
    }

    #[test]
    fn builders_override_defaults() {
        let config = AppConfig::default()
            .with_mode(DrawMode::Wireframe)
            .with_spin_speed(-2.0);
        assert_eq!(config.mode, DrawMode::Wireframe);
        assert_eq!(config.spin_speed, -2.0);
    }
}
