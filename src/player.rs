use log::{debug, trace};

use crate::config::Config;
use crate::controls::{Controls, Direction};
use crate::geo::{Point, Rect, Vec2};
use crate::platform::Platform;
use crate::sprites::{Bitmap, Drawable, SpriteSheet};
use crate::Error;

/// Speeds below this are snapped to zero so friction does not creep forever.
const DEADZONE: f32 = 0.1;
/// Horizontal speed above which the walk cycle plays.
const WALK_THRESHOLD: f32 = 1.0;

/// Frame identifier for managing animations.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Frame {
    Standing(usize),
    StandingMirrored,
    WalkLeft(usize),
    WalkRight(usize),
    Jump,
}

/// Which animation branch ran on a given frame.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Branch {
    Walk,
    Idle,
    Airborne,
}

/// Every bitmap the player can show. The sheet's frames face left.
#[derive(Debug)]
struct Frames {
    standing: [Bitmap; 2],
    standing_mirrored: Bitmap,
    walk_left: [Bitmap; 2],
    walk_right: [Bitmap; 2],
    jump: Bitmap,
}

/// The player entity.
#[derive(Debug)]
pub struct Player {
    pos: Vec2,
    vel: Vec2,
    acc: Vec2,
    facing: Direction,
    walking: bool,
    jumping: bool,
    current_frame: usize,
    last_update: u64,
    frame: Frame,
    frames: Frames,
    rect: Rect,
    config: Config,
}

impl Frames {
    fn load(sheet: &SpriteSheet, config: &Config) -> Result<Frames, Error> {
        let layout = &config.sheet;
        let key = config.color_key;
        let slice = |region| -> Result<Bitmap, Error> {
            Ok(sheet.get_region(region)?.with_color_key(key))
        };

        let standing = slice(layout.standing)?;
        let walk_left = [slice(layout.walk[0])?, slice(layout.walk[1])?];
        let walk_right = [walk_left[0].flip_horizontal(), walk_left[1].flip_horizontal()];

        Ok(Frames {
            standing_mirrored: standing.flip_horizontal(),
            standing: [standing.clone(), standing],
            walk_left,
            walk_right,
            jump: slice(layout.jump)?,
        })
    }

    fn get(&self, frame: Frame) -> &Bitmap {
        match frame {
            Frame::Standing(i) => &self.standing[i % self.standing.len()],
            Frame::StandingMirrored => &self.standing_mirrored,
            Frame::WalkLeft(i) => &self.walk_left[i % self.walk_left.len()],
            Frame::WalkRight(i) => &self.walk_right[i % self.walk_right.len()],
            Frame::Jump => &self.jump,
        }
    }
}

impl Player {
    /// Create a player standing at the center of the screen.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] when the sheet layout does not fit the sprite sheet.
    pub fn new(sheet: &SpriteSheet, config: Config) -> Result<Player, Error> {
        let frames = Frames::load(sheet, &config)?;
        let pos = Vec2::new(
            config.screen_width as f32 / 2.0,
            config.screen_height as f32 / 2.0,
        );
        let frame = Frame::Standing(0);
        let image = frames.get(frame);
        let rect = Rect::from_midbottom(pos.into(), image.width(), image.height());

        Ok(Player {
            pos,
            vel: Vec2::default(),
            acc: Vec2::default(),
            facing: Direction::default(),
            walking: false,
            jumping: false,
            current_frame: 0,
            last_update: 0,
            frame,
            frames,
            rect,
            config,
        })
    }

    pub fn position(&self) -> Vec2 {
        self.pos
    }

    pub fn velocity(&self) -> Vec2 {
        self.vel
    }

    pub fn acceleration(&self) -> Vec2 {
        self.acc
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    pub fn is_walking(&self) -> bool {
        self.walking
    }

    pub fn is_jumping(&self) -> bool {
        self.jumping
    }

    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    /// Move the player so its feet are at `pos`.
    pub fn set_position(&mut self, pos: Vec2) {
        self.pos = pos;
        self.anchor();
    }

    /// Advance one simulated frame: integrate motion, then pick the bitmap to show.
    pub fn update(&mut self, controls: &Controls, now_ms: u64) -> Branch {
        self.integrate(controls);
        self.animate(now_ms)
    }

    /// Jump, but only when standing on a platform.
    ///
    /// Ground contact is tested with a copy of the bounding box moved one pixel down. Returns
    /// `true` when the jump happened.
    pub fn jump(&mut self, platforms: &[Platform]) -> bool {
        let probe = self.rect.translate(0, 1);
        let grounded = platforms
            .iter()
            .any(|platform| probe.intersects(platform.bounding_box()));

        if grounded {
            debug!("Jump from {:?}", self.rect.midbottom());
            self.vel.y = -self.config.jump_speed;
            self.jumping = true;
        }

        grounded
    }

    /// Stand on a surface whose top edge is at `top`.
    pub fn land(&mut self, top: i32) {
        self.pos.y = top as f32;
        self.vel.y = 0.0;
        if self.jumping {
            debug!("Landed at {:?}", Point::from(self.pos));
            self.jumping = false;
            self.set_frame(self.resting_frame());
        }
        self.anchor();
    }

    /// Semi-implicit Euler step with friction and a half-step position correction.
    fn integrate(&mut self, controls: &Controls) {
        self.acc = Vec2::new(0.0, self.config.gravity);
        if controls.is_held(Direction::Left) {
            self.facing = Direction::Left;
            self.acc.x -= self.config.acceleration;
        }
        if controls.is_held(Direction::Right) {
            self.facing = Direction::Right;
            self.acc.x += self.config.acceleration;
        }

        // Apply friction
        self.acc.x += self.vel.x * self.config.friction;

        // Equations of motion
        self.vel += self.acc;
        if self.vel.x.abs() < DEADZONE {
            self.vel.x = 0.0;
        }
        self.pos += self.vel + self.acc.scale(0.5);

        self.wrap();
        self.anchor();
    }

    /// Wrap around the sides of the screen once the sprite has fully left it.
    fn wrap(&mut self) -> bool {
        let half = self.rect.width() as f32 / 2.0;
        let width = self.config.screen_width as f32;

        let wrapped = if self.pos.x > width + half {
            self.pos.x = -half;
            true
        } else if self.pos.x < -half {
            self.pos.x = width + half;
            true
        } else {
            false
        };
        if wrapped {
            debug!("Wrapped to x = {}", self.pos.x);
        }

        wrapped
    }

    /// Select the next animation frame based on velocity and elapsed time.
    fn animate(&mut self, now_ms: u64) -> Branch {
        self.walking = self.vel.x.abs() > WALK_THRESHOLD;
        let elapsed = now_ms.saturating_sub(self.last_update);

        if self.walking {
            if elapsed >= self.config.walk_frame_interval_ms {
                self.last_update = now_ms;
                self.current_frame = (self.current_frame + 1) % self.frames.walk_left.len();
                let frame = if self.vel.x > 0.0 {
                    self.facing = Direction::Right;
                    Frame::WalkRight(self.current_frame)
                } else {
                    self.facing = Direction::Left;
                    Frame::WalkLeft(self.current_frame)
                };
                self.set_frame(frame);
            }

            Branch::Walk
        } else if self.jumping {
            if self.frame != Frame::Jump {
                self.set_frame(Frame::Jump);
            }

            Branch::Airborne
        } else {
            if elapsed >= self.config.idle_frame_interval_ms {
                self.last_update = now_ms;
                self.current_frame = (self.current_frame + 1) % self.frames.standing.len();
                self.set_frame(self.idle_frame());
            }

            Branch::Idle
        }
    }

    /// The frame to show on touching down, chosen by the walking guard.
    fn resting_frame(&self) -> Frame {
        if self.vel.x.abs() <= WALK_THRESHOLD {
            self.idle_frame()
        } else if self.vel.x > 0.0 {
            Frame::WalkRight(self.current_frame)
        } else {
            Frame::WalkLeft(self.current_frame)
        }
    }

    fn idle_frame(&self) -> Frame {
        match self.facing {
            Direction::Left => Frame::Standing(self.current_frame),
            Direction::Right => Frame::StandingMirrored,
        }
    }

    /// Swap the displayed bitmap, keeping the feet where they were.
    fn set_frame(&mut self, frame: Frame) {
        trace!("Frame {:?} -> {:?}", self.frame, frame);
        let anchor = self.rect.midbottom();
        let image = self.frames.get(frame);

        self.frame = frame;
        self.rect = Rect::from_midbottom(anchor, image.width(), image.height());
    }

    /// Put the bottom-center of the bounding box on the position.
    fn anchor(&mut self) {
        self.rect = Rect::from_midbottom(self.pos.into(), self.rect.width(), self.rect.height());
    }
}

impl Drawable for Player {
    fn bitmap(&self) -> &Bitmap {
        self.frames.get(self.frame)
    }

    fn bounding_box(&self) -> Rect {
        self.rect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{test_config, test_sheet};

    const STILL: Controls = Controls {
        left: false,
        right: false,
        jump: false,
    };
    const RIGHT: Controls = Controls {
        left: false,
        right: true,
        jump: false,
    };

    fn player() -> Player {
        Player::new(&test_sheet(), test_config()).unwrap()
    }

    #[test]
    fn starts_centered() {
        let player = player();

        assert_eq!(player.position(), Vec2::new(240.0, 300.0));
        assert_eq!(player.bounding_box().midbottom(), Point::new(240, 300));
        assert_eq!(player.bounding_box().height(), 80);
        assert_eq!(player.frame(), Frame::Standing(0));
        assert_eq!(player.facing(), Direction::Right);
    }

    #[test]
    fn layout_out_of_bounds() {
        let mut config = test_config();
        config.sheet.jump = Rect::from_size(60, 0, 10, 10);

        assert!(Player::new(&test_sheet(), config).is_err());
    }

    #[test]
    fn integration_is_deterministic() {
        let mut a = player();
        let mut b = player();
        let inputs = [RIGHT, RIGHT, STILL, RIGHT, STILL, STILL, RIGHT];

        for (i, controls) in inputs.iter().cycle().take(200).enumerate() {
            let now = i as u64 * 16;
            assert_eq!(a.update(controls, now), b.update(controls, now));

            let (pa, pb) = (a.position(), b.position());
            let (va, vb) = (a.velocity(), b.velocity());
            assert_eq!(pa.x.to_bits(), pb.x.to_bits());
            assert_eq!(pa.y.to_bits(), pb.y.to_bits());
            assert_eq!(va.x.to_bits(), vb.x.to_bits());
            assert_eq!(va.y.to_bits(), vb.y.to_bits());
        }
    }

    #[test]
    fn first_step_matches_equations_of_motion() {
        let mut player = player();
        player.update(&RIGHT, 0);

        // acc = (0.5, 0.8), vel = acc, pos += vel + acc / 2
        assert_eq!(player.acceleration(), Vec2::new(0.5, 0.8));
        assert_eq!(player.velocity(), Vec2::new(0.5, 0.8));
        assert_eq!(player.position(), Vec2::new(240.75, 301.2));
        assert_eq!(player.facing(), Direction::Right);
    }

    #[test]
    fn opposing_keys_cancel() {
        let mut player = player();
        let both = Controls {
            left: true,
            right: true,
            jump: false,
        };
        player.update(&both, 0);

        assert_eq!(player.velocity().x, 0.0);
        assert_eq!(player.facing(), Direction::Right);
    }

    #[test]
    fn deadzone_converges() {
        let mut player = player();
        player.vel = Vec2::new(10.0, 0.0);

        let mut frames = 0;
        while player.velocity().x != 0.0 {
            player.update(&STILL, 0);
            assert!(player.velocity().x >= 0.0, "Never overshoots zero");
            frames += 1;
            assert!(frames < 100, "Friction should stop the player");
        }

        // And it stays put
        player.update(&STILL, 0);
        assert_eq!(player.velocity().x, 0.0);
    }

    #[test]
    fn wrap_right_edge() {
        let mut player = player();
        assert_eq!(player.bounding_box().width(), 10);

        // Sprite edge still touching the screen
        player.set_position(Vec2::new(485.0, 300.0));
        assert!(!player.wrap());
        assert_eq!(player.position().x, 485.0);

        player.set_position(Vec2::new(485.5, 300.0));
        assert!(player.wrap());
        assert_eq!(player.position().x, -5.0);

        assert!(!player.wrap(), "Wrapping twice is a no-op");
        assert_eq!(player.position().x, -5.0);
    }

    #[test]
    fn wrap_left_edge() {
        let mut player = player();

        player.set_position(Vec2::new(-5.5, 300.0));
        assert!(player.wrap());
        assert_eq!(player.position().x, 485.0);

        assert!(!player.wrap(), "Wrapping twice is a no-op");
        assert_eq!(player.position().x, 485.0);
    }

    #[test]
    fn wrap_while_walking() {
        let mut player = player();
        player.set_position(Vec2::new(484.0, 300.0));
        player.vel = Vec2::new(4.0, 0.0);
        player.update(&RIGHT, 0);

        assert_eq!(player.position().x, -5.0);
        assert_eq!(player.bounding_box().midbottom().x, -5);
    }

    #[test]
    fn jump_gated_by_ground_contact() {
        let sheet = test_sheet();
        let config = test_config();
        let mut player = Player::new(&sheet, config).unwrap();
        player.set_position(Vec2::new(100.0, 180.0));
        assert_eq!(player.bounding_box().y(), 100);
        assert_eq!(player.bounding_box().bottom(), 180);

        // Far below: no-op
        let far = [Platform::new(&sheet, &config, 50, 300).unwrap()];
        assert!(!player.jump(&far));
        assert_eq!(player.velocity().y, 0.0);
        assert!(!player.is_jumping());

        // One pixel below the feet
        let rect = player.bounding_box();
        let near = [Platform::new(&sheet, &config, 50, 181).unwrap()];
        assert!(player.jump(&near));
        assert_eq!(player.velocity().y, -20.0);
        assert!(player.is_jumping());
        assert_eq!(player.bounding_box(), rect, "Probe leaves no trace");
    }

    #[test]
    fn no_jump_beside_a_wall() {
        let sheet = test_sheet();
        let config = test_config();
        let mut player = Player::new(&sheet, config).unwrap();
        player.set_position(Vec2::new(100.0, 300.0));
        assert_eq!(player.bounding_box().x(), 95);

        // Touching the wall's left face, feet level with its middle
        let wall = [Platform::new(&sheet, &config, 105, 250).unwrap()];
        assert!(!player.jump(&wall));
        assert_eq!(player.velocity().y, 0.0);
        assert!(!player.is_jumping());

        // Touching the wall's right face
        let wall = [Platform::new(&sheet, &config, -55, 250).unwrap()];
        assert!(!player.jump(&wall));
        assert!(!player.is_jumping());
    }

    #[test]
    fn jump_while_airborne_is_noop() {
        let sheet = test_sheet();
        let config = test_config();
        let mut player = Player::new(&sheet, config).unwrap();
        let platforms = [Platform::new(&sheet, &config, 200, 300).unwrap()];

        assert!(player.jump(&platforms));
        player.update(&STILL, 0);
        let vel = player.velocity();

        assert!(!player.jump(&platforms));
        assert!(!player.jump(&platforms));
        assert_eq!(player.velocity(), vel);
    }

    #[test]
    fn walk_cadence() {
        let mut player = player();
        player.vel = Vec2::new(5.0, 0.0);

        assert_eq!(player.animate(0), Branch::Walk);
        assert_eq!(player.current_frame(), 0);

        player.animate(179);
        assert_eq!(player.current_frame(), 0, "Not yet");
        assert_eq!(player.frame(), Frame::Standing(0));

        player.animate(180);
        assert_eq!(player.current_frame(), 1);
        assert_eq!(player.frame(), Frame::WalkRight(1));

        player.animate(359);
        assert_eq!(player.current_frame(), 1);

        player.animate(360);
        assert_eq!(player.current_frame(), 0);
        assert_eq!(player.frame(), Frame::WalkRight(0));
    }

    #[test]
    fn walk_left_faces_left() {
        let mut player = player();
        player.vel = Vec2::new(-3.0, 0.0);
        player.animate(200);

        assert_eq!(player.frame(), Frame::WalkLeft(1));
        assert_eq!(player.facing(), Direction::Left);
    }

    #[test]
    fn frame_change_keeps_feet() {
        let mut player = player();
        let anchor = player.bounding_box().midbottom();
        player.vel = Vec2::new(5.0, 0.0);

        player.animate(180);
        assert_eq!(player.bounding_box().height(), 82);
        assert_eq!(player.bounding_box().midbottom(), anchor);

        player.animate(360);
        assert_eq!(player.bounding_box().height(), 78);
        assert_eq!(player.bounding_box().midbottom(), anchor);
    }

    #[test]
    fn idle_cadence() {
        let mut player = player();

        assert_eq!(player.animate(349), Branch::Idle);
        assert_eq!(player.frame(), Frame::Standing(0));

        // Facing right shows the mirrored frame
        player.animate(350);
        assert_eq!(player.current_frame(), 1);
        assert_eq!(player.frame(), Frame::StandingMirrored);

        player.facing = Direction::Left;
        player.animate(700);
        assert_eq!(player.current_frame(), 0);
        assert_eq!(player.frame(), Frame::Standing(0));
    }

    #[test]
    fn branches_are_exclusive() {
        for &vx in &[0.0, 0.5, 1.0, -1.0, 1.01, -1.01, 7.5, -7.5] {
            let mut player = player();
            player.vel = Vec2::new(vx, 0.0);
            let branch = player.animate(1000);

            let walking = vx.abs() > 1.0;
            assert_eq!(branch == Branch::Walk, walking, "vx = {}", vx);
            assert_eq!(branch == Branch::Idle, !walking, "vx = {}", vx);
            assert_eq!(player.is_walking(), walking);

            // Exactly one frame update happened
            assert_eq!(player.current_frame(), 1);
            match player.frame() {
                Frame::WalkLeft(_) | Frame::WalkRight(_) => assert!(walking),
                Frame::Standing(_) | Frame::StandingMirrored => assert!(!walking),
                Frame::Jump => panic!("Not airborne"),
            }
        }
    }

    #[test]
    fn landing_while_running_keeps_walk_frames() {
        let sheet = test_sheet();
        let config = test_config();
        let mut player = Player::new(&sheet, config).unwrap();
        let platforms = [Platform::new(&sheet, &config, 200, 300).unwrap()];
        player.vel = Vec2::new(4.0, 0.0);

        assert!(player.jump(&platforms));
        assert_eq!(player.update(&RIGHT, 10), Branch::Walk);

        player.land(300);
        assert!(!player.is_jumping());
        assert!(player.is_walking());
        assert_eq!(player.frame(), Frame::WalkRight(player.current_frame()));
        assert_eq!(player.bounding_box().bottom(), 300);

        // The next frame stays on the walk cycle
        assert_eq!(player.update(&RIGHT, 20), Branch::Walk);
        match player.frame() {
            Frame::WalkRight(_) => (),
            other => panic!("Expected a walk frame, got {:?}", other),
        }
    }

    #[test]
    fn airborne_shows_jump_frame_until_landing() {
        let sheet = test_sheet();
        let config = test_config();
        let mut player = Player::new(&sheet, config).unwrap();
        let platforms = [Platform::new(&sheet, &config, 200, 300).unwrap()];

        assert!(player.jump(&platforms));
        assert_eq!(player.update(&STILL, 1000), Branch::Airborne);
        assert_eq!(player.frame(), Frame::Jump);
        assert_eq!(player.bounding_box().height(), 90);
        assert_eq!(player.current_frame(), 0, "Idle timer is frozen");

        player.land(300);
        assert!(!player.is_jumping());
        assert_eq!(player.velocity().y, 0.0);
        assert_eq!(player.frame(), Frame::StandingMirrored);
        assert_eq!(player.bounding_box().bottom(), 300);
    }
}
