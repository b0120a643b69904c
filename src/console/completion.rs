//! Tab completion by longest common prefix

use super::commands::Completion;

/// What a tab press should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completed<'a> {
    /// No candidate starts with the prefix, or the only one equals it
    Nothing,
    /// Append this text; every match continues with it
    Extend(&'a str),
    /// Several matches and nothing to add: list them
    Ambiguous,
}

/// Complete `prefix` against `candidates`.
///
/// Every candidate is visited once.
pub fn complete<'a, I>(prefix: &str, candidates: I) -> Completed<'a>
where
    I: Iterator<Item = &'a str>,
{
    let mut first: Option<&'a str> = None;
    let mut common = 0;
    let mut matches = 0;

    for c in candidates.filter(|c| c.starts_with(prefix)) {
        match first {
            None => {
                first = Some(c);
                common = c.len();
            }
            Some(f) => {
                common = f
                    .bytes()
                    .zip(c.bytes())
                    .take(common)
                    .take_while(|(a, b)| a == b)
                    .count();
            }
        }
        matches += 1;
    }

    match first {
        None => Completed::Nothing,
        Some(f) if common > prefix.len() => Completed::Extend(&f[prefix.len()..common]),
        Some(_) if matches == 1 => Completed::Nothing,
        Some(_) => Completed::Ambiguous,
    }
}

/// Restartable iterator over a completion source
#[derive(Clone)]
pub enum Candidates<C> {
    /// Command names
    Commands(C),
    /// Fixed word list
    List(core::slice::Iter<'static, &'static str>),
    /// Index-addressed generator
    Fn {
        next: fn(usize) -> Option<&'static str>,
        idx: usize,
    },
}

impl<C> Candidates<C>
where
    C: Iterator<Item = &'static str> + Clone,
{
    /// Start iterating `source`; `commands` is used for [`Completion::Commands`]
    pub fn new(source: Completion, commands: C) -> Self {
        match source {
            Completion::Commands => Self::Commands(commands),
            Completion::List(words) => Self::List(words.iter()),
            Completion::Fn(next) => Self::Fn { next, idx: 0 },
        }
    }
}

impl<C> Iterator for Candidates<C>
where
    C: Iterator<Item = &'static str>,
{
    type Item = &'static str;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Commands(names) => names.next(),
            Self::List(words) => words.next().copied(),
            Self::Fn { next, idx } => {
                let item = (*next)(*idx)?;
                *idx += 1;
                Some(item)
            }
        }
    }
}
