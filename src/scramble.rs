use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub scrambled: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Scrambler {
    original: Vec<char>,
    alphabet: Vec<char>,
    max_iterations: u32,
    iteration: u32,
    running: bool,
}

impl Scrambler {
    pub fn new(text: &str, alphabet: &str, max_iterations: u32) -> Self {
        Self {
            original: text.chars().collect(),
            alphabet: alphabet.chars().collect(),
            max_iterations,
            iteration: 0,
            running: false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn resting_glyphs(&self) -> Vec<Glyph> {
        self.original
            .iter()
            .map(|&ch| Glyph { ch, scrambled: false })
            .collect()
    }

    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        self.iteration = 0;
        true
    }

    /// One interval tick. The second value is `true` once the original text is back.
    pub fn tick<R: Rng>(&mut self, rng: &mut R) -> (Vec<Glyph>, bool) {
        if !self.running {
            return (self.resting_glyphs(), true);
        }

        let glyphs = if self.iteration < self.max_iterations {
            self.original
                .iter()
                .map(|&ch| self.scramble_char(ch, rng))
                .collect()
        } else {
            self.resting_glyphs()
        };

        self.iteration += 1;
        if self.iteration > self.max_iterations {
            self.running = false;
        }
        (glyphs, !self.running)
    }

    pub fn cancel(&mut self) -> Vec<Glyph> {
        self.running = false;
        self.iteration = 0;
        self.resting_glyphs()
    }

    fn scramble_char<R: Rng>(&self, ch: char, rng: &mut R) -> Glyph {
        if ch.is_whitespace() || self.alphabet.is_empty() {
            return Glyph { ch, scrambled: false };
        }
        let replacement = self.alphabet[rng.random_range(0..self.alphabet.len())];
        Glyph {
            ch: replacement,
            scrambled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

    fn glyphs_to_string(glyphs: &[Glyph]) -> String {
        glyphs.iter().map(|glyph| glyph.ch).collect()
    }

    fn run_to_completion(scrambler: &mut Scrambler, rng: &mut SmallRng) -> Vec<Vec<Glyph>> {
        let mut frames = Vec::new();
        loop {
            let (glyphs, done) = scrambler.tick(rng);
            frames.push(glyphs);
            if done {
                return frames;
            }
        }
    }

    #[test]
    fn budget_is_spent_then_text_is_restored_exactly() {
        let text = "Ada  Lovelace, engineer";
        let mut scrambler = Scrambler::new(text, ALPHABET, 15);
        let mut rng = SmallRng::seed_from_u64(3);

        assert!(scrambler.start());
        let frames = run_to_completion(&mut scrambler, &mut rng);

        assert_eq!(frames.len(), 16);
        assert_eq!(glyphs_to_string(&frames[15]), text);
        assert!(frames[15].iter().all(|glyph| !glyph.scrambled));
        assert!(!scrambler.is_running());
    }

    #[test]
    fn spaces_survive_every_tick() {
        let text = "a b  c";
        let mut scrambler = Scrambler::new(text, ALPHABET, 5);
        let mut rng = SmallRng::seed_from_u64(9);
        scrambler.start();

        for frame in run_to_completion(&mut scrambler, &mut rng) {
            let rendered: Vec<char> = frame.iter().map(|glyph| glyph.ch).collect();
            for (index, original) in text.chars().enumerate() {
                if original == ' ' {
                    assert_eq!(rendered[index], ' ');
                } else {
                    assert_ne!(rendered[index], ' ');
                }
            }
        }
    }

    #[test]
    fn scrambled_characters_come_from_the_alphabet() {
        let mut scrambler = Scrambler::new("hello", "xy", 3);
        let mut rng = SmallRng::seed_from_u64(1);
        scrambler.start();

        let (glyphs, done) = scrambler.tick(&mut rng);
        assert!(!done);
        assert!(glyphs.iter().all(|glyph| glyph.scrambled && (glyph.ch == 'x' || glyph.ch == 'y')));
    }

    #[test]
    fn second_start_while_running_is_ignored() {
        let mut scrambler = Scrambler::new("name", ALPHABET, 4);
        let mut rng = SmallRng::seed_from_u64(5);

        assert!(scrambler.start());
        scrambler.tick(&mut rng);
        assert!(!scrambler.start());

        let remaining = run_to_completion(&mut scrambler, &mut rng);
        assert_eq!(remaining.len(), 4);
    }

    #[test]
    fn cancel_restores_immediately() {
        let mut scrambler = Scrambler::new("role text", ALPHABET, 12);
        let mut rng = SmallRng::seed_from_u64(21);
        scrambler.start();
        scrambler.tick(&mut rng);

        let restored = scrambler.cancel();
        assert_eq!(glyphs_to_string(&restored), "role text");
        assert!(!scrambler.is_running());
        assert!(scrambler.start());
    }

    #[test]
    fn empty_alphabet_leaves_text_alone() {
        let mut scrambler = Scrambler::new("abc", "", 2);
        let mut rng = SmallRng::seed_from_u64(2);
        scrambler.start();

        let (glyphs, _) = scrambler.tick(&mut rng);
        assert_eq!(glyphs_to_string(&glyphs), "abc");
    }

    #[test]
    fn zero_budget_restores_on_first_tick() {
        let mut scrambler = Scrambler::new("abc", ALPHABET, 0);
        let mut rng = SmallRng::seed_from_u64(4);
        scrambler.start();

        let (glyphs, done) = scrambler.tick(&mut rng);
        assert!(done);
        assert_eq!(glyphs_to_string(&glyphs), "abc");
    }
}
