//! Fixed-length character n-grams used as index keys.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NgramError {
    #[error("expected {expected} characters, found {found}")]
    Length { expected: usize, found: usize },
}

/// Ordered pair of characters. `(a, b)` and `(b, a)` are different keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Digram(pub [char; 2]);

/// Ordered triple of characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Trigram(pub [char; 3]);

impl Digram {
    pub fn new(a: char, b: char) -> Self {
        Self([a, b])
    }

    /// Every adjacent pair of `chars`, in order.
    pub fn windows(chars: &[char]) -> impl Iterator<Item = Digram> + '_ {
        chars.windows(2).map(|w| Digram([w[0], w[1]]))
    }
}

impl Trigram {
    pub fn new(a: char, b: char, c: char) -> Self {
        Self([a, b, c])
    }

    /// Every adjacent triple of `chars`, in order.
    pub fn windows(chars: &[char]) -> impl Iterator<Item = Trigram> + '_ {
        chars.windows(3).map(|w| Trigram([w[0], w[1], w[2]]))
    }
}

fn collect_exact<const N: usize>(s: &str) -> Result<[char; N], NgramError> {
    let mut out = ['\0'; N];
    let mut found = 0;
    for c in s.chars() {
        if found < N {
            out[found] = c;
        }
        found += 1;
    }
    if found == N {
        Ok(out)
    } else {
        Err(NgramError::Length { expected: N, found })
    }
}

impl TryFrom<&str> for Digram {
    type Error = NgramError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        collect_exact::<2>(s).map(Digram)
    }
}

impl TryFrom<&str> for Trigram {
    type Error = NgramError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        collect_exact::<3>(s).map(Trigram)
    }
}

impl fmt::Display for Digram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0[0], self.0[1])
    }
}

impl fmt::Display for Trigram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.0[0], self.0[1], self.0[2])
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn order_sensitive() {
        assert_ne!(Digram::new('a', 'b'), Digram::new('b', 'a'));
        let mut set = HashSet::new();
        set.insert(Digram::new('食', 'べ'));
        assert!(set.contains(&Digram::new('食', 'べ')));
        assert!(!set.contains(&Digram::new('べ', '食')));
    }

    #[test]
    fn windows() {
        let chars: Vec<char> = "たべる".chars().collect();
        let digrams: Vec<Digram> = Digram::windows(&chars).collect();
        assert_eq!(
            digrams,
            vec![Digram::new('た', 'べ'), Digram::new('べ', 'る')]
        );
        let trigrams: Vec<Trigram> = Trigram::windows(&chars).collect();
        assert_eq!(trigrams, vec![Trigram::new('た', 'べ', 'る')]);
    }

    #[test]
    fn windows_too_short() {
        let chars: Vec<char> = "た".chars().collect();
        assert_eq!(Digram::windows(&chars).count(), 0);
        assert_eq!(Trigram::windows(&chars).count(), 0);
    }

    #[test]
    fn try_from_str() {
        assert_eq!(Digram::try_from("漢字").unwrap(), Digram::new('漢', '字'));
        assert_eq!(Trigram::try_from("eat").unwrap(), Trigram::new('e', 'a', 't'));
        assert_eq!(
            Digram::try_from("漢字語"),
            Err(NgramError::Length {
                expected: 2,
                found: 3
            })
        );
        assert_eq!(
            Trigram::try_from(""),
            Err(NgramError::Length {
                expected: 3,
                found: 0
            })
        );
    }

    #[test]
    fn display() {
        assert_eq!(Digram::new('た', 'べ').to_string(), "たべ");
        assert_eq!(Trigram::new('e', 'a', 't').to_string(), "eat");
    }
}
