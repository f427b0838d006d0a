use crate::errors::{DegenerateData, Result, invalid_argument, invalid_input, invariant_violation};
use crate::input;
use clap::ValueEnum;
use itertools::Itertools;
use log::trace;
use num_rational::Rational64;
use num_traits::{ToPrimitive, Zero};
use rand::seq::SliceRandom;
use rand_xoshiro::Xoshiro256PlusPlus;
use rand_xoshiro::rand_core::SeedableRng;
use serde::Serialize;
use std::collections::HashMap;
use std::collections::hash_map::Entry::{Occupied, Vacant};
use std::io::BufRead;
use std::str::FromStr;
use std::{fmt, iter, vec};

/// How to order instances that share a score.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TieMode {
    /// Replace each label in the tie by the mean label of the tie.
    #[default]
    Smooth,
    /// Keep the order in which the instances were added.
    Ignore,
    /// Shuffle the tied instances.
    Sample,
}

impl fmt::Display for TieMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TieMode::Smooth => write!(f, "smooth"),
            TieMode::Ignore => write!(f, "ignore"),
            TieMode::Sample => write!(f, "sample"),
        }
    }
}

impl FromStr for TieMode {
    type Err = Box<dyn std::error::Error + Send + Sync>;

    fn from_str(s: &str) -> Result<TieMode> {
        match s {
            "smooth" => Ok(TieMode::Smooth),
            "ignore" => Ok(TieMode::Ignore),
            "sample" => Ok(TieMode::Sample),
            _ => Err(invalid_argument(format!(
                "tie mode must be 'smooth', 'ignore', or 'sample', got '{s}'"
            ))),
        }
    }
}

/// Confusion matrix counts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Counts<T> {
    pub tp: T,
    pub tn: T,
    pub fp: T,
    pub fn_: T,
}

/// The confusion matrix at one threshold of a sweep.
///
/// Counts are exact integers unless a smoothed tie has left the threshold
/// in the middle of a tied group.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Confusion {
    Exact(Counts<u64>),
    Fractional(Counts<f64>),
}

impl Confusion {
    pub fn is_exact(&self) -> bool {
        matches!(self, Confusion::Exact(_))
    }

    pub fn to_f64(&self) -> Counts<f64> {
        match *self {
            Confusion::Exact(c) => Counts {
                tp: c.tp as f64,
                tn: c.tn as f64,
                fp: c.fp as f64,
                fn_: c.fn_ as f64,
            },
            Confusion::Fractional(c) => c,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GroupLabel {
    Negative,
    Positive,
    Mixed,
}

#[derive(Clone, Debug)]
struct Group {
    score: f64,
    labels: Vec<bool>,
    tag: GroupLabel,
}

fn tag_of(label: bool) -> GroupLabel {
    if label {
        GroupLabel::Positive
    } else {
        GroupLabel::Negative
    }
}

/// Scored and labeled instances, grouped by score.
#[derive(Clone, Debug, Default)]
pub struct ScoredData {
    groups: Vec<Group>,
    index: HashMap<u64, usize>,
    num: u64,
    num_pos: u64,
    num_neg: u64,
    num_mixed: u64,
}

impl ScoredData {
    pub fn new() -> ScoredData {
        ScoredData::default()
    }

    pub fn from_pairs<I>(pairs: I) -> Result<ScoredData>
    where
        I: IntoIterator<Item = (f64, bool)>,
    {
        let mut data = ScoredData::new();
        for (score, label) in pairs {
            data.add(score, label)?;
        }
        Ok(data)
    }

    /// Build data where the positives are at the given ranks, counting from 0.
    ///
    /// There are `n` instances in total, and the instance at rank `r` has
    /// score `-r`. Ranks must be distinct.
    pub fn from_ranks0(positive_ranks: &[i64], n: u64) -> Result<ScoredData> {
        let too_many = || invalid_input(format!("cannot hold {n} instances"));
        let size = usize::try_from(n).map_err(|_| too_many())?;
        let mut positive = Vec::new();
        positive.try_reserve_exact(size).map_err(|_| too_many())?;
        positive.resize(size, false);
        for &r in positive_ranks {
            if r < 0 || r as u64 >= n {
                return Err(invalid_input(format!(
                    "rank {r} is outside the range 0..{n}"
                )));
            }
            if positive[r as usize] {
                return Err(invalid_input(format!(
                    "duplicate rank {r}: ties cannot be expressed by ranks"
                )));
            }
            positive[r as usize] = true;
        }
        let mut data = ScoredData::new();
        data.groups.try_reserve_exact(size).map_err(|_| too_many())?;
        data.index.try_reserve(size).map_err(|_| too_many())?;
        for (r, label) in positive.into_iter().enumerate() {
            data.add(-(r as f64), label)?;
        }
        Ok(data)
    }

    /// Like [ScoredData::from_ranks0], but ranks count from 1.
    pub fn from_ranks1(positive_ranks: &[i64], n: u64) -> Result<ScoredData> {
        let ranks = positive_ranks.iter().map(|r| r - 1).collect_vec();
        ScoredData::from_ranks0(&ranks, n)
    }

    /// Read `score label` lines; any nonzero label is positive.
    pub fn read_from<R: BufRead>(reader: R) -> Result<ScoredData> {
        let rows: Vec<(f64, i64)> = input::read_columns(reader, "score", "label")?;
        ScoredData::from_pairs(rows.into_iter().map(|(s, l)| (s, l != 0)))
    }

    /// Read the total count followed by the positive ranks, counting from 0.
    pub fn read_ranks0_from<R: BufRead>(reader: R) -> Result<ScoredData> {
        let (n, ranks) = read_rank_file(reader)?;
        ScoredData::from_ranks0(&ranks, n)
    }

    /// Read the total count followed by the positive ranks, counting from 1.
    pub fn read_ranks1_from<R: BufRead>(reader: R) -> Result<ScoredData> {
        let (n, ranks) = read_rank_file(reader)?;
        ScoredData::from_ranks1(&ranks, n)
    }

    pub fn add(&mut self, score: f64, label: bool) -> Result<()> {
        if score.is_nan() {
            return Err(invalid_input(format!(
                "score must be a number, got {score}"
            )));
        }
        // -0.0 and 0.0 are the same score
        let score = if score == 0.0 { 0.0 } else { score };
        self.num += 1;
        if label {
            self.num_pos += 1;
        } else {
            self.num_neg += 1;
        }
        debug_assert_eq!(self.num_pos + self.num_neg, self.num);
        match self.index.entry(score.to_bits()) {
            Vacant(e) => {
                e.insert(self.groups.len());
                self.groups.push(Group {
                    score,
                    labels: vec![label],
                    tag: tag_of(label),
                });
            }
            Occupied(e) => {
                let group = &mut self.groups[*e.get()];
                group.labels.push(label);
                if group.tag != GroupLabel::Mixed && group.tag != tag_of(label) {
                    group.tag = GroupLabel::Mixed;
                    self.num_mixed += 1;
                }
            }
        }
        Ok(())
    }

    pub fn len(&self) -> u64 {
        self.num
    }

    pub fn is_empty(&self) -> bool {
        self.num == 0
    }

    pub fn positives(&self) -> u64 {
        self.num_pos
    }

    pub fn negatives(&self) -> u64 {
        self.num_neg
    }

    /// Number of distinct scores shared by both a positive and a negative instance.
    pub fn mixed_tie_count(&self) -> u64 {
        self.num_mixed
    }

    fn check_both_classes(&self) -> Result<()> {
        if self.num_pos == 0 || self.num_neg == 0 {
            return Err(DegenerateData {
                positives: self.num_pos,
                negatives: self.num_neg,
            }
            .into());
        }
        Ok(())
    }

    /// Sweep the threshold from +infinity down to -infinity.
    ///
    /// With [TieMode::Sample], the ties are shuffled with a generator seeded
    /// from the thread-local random source.
    pub fn sweep_threshold(&self, tie_mode: TieMode) -> Result<Sweep<'_>> {
        let rng = Xoshiro256PlusPlus::seed_from_u64(rand::random());
        self.sweep_threshold_with_rng(tie_mode, rng)
    }

    pub fn sweep_threshold_with_rng(
        &self,
        tie_mode: TieMode,
        rng: Xoshiro256PlusPlus,
    ) -> Result<Sweep<'_>> {
        self.check_both_classes()?;
        let mut order = (0..self.groups.len()).collect_vec();
        order.sort_unstable_by(|&a, &b| self.groups[b].score.total_cmp(&self.groups[a].score));
        trace!(
            target: "croc",
            "sweep over {} distinct scores, {} mixed, ties: {tie_mode}",
            order.len(),
            self.num_mixed
        );
        Ok(Sweep {
            groups: &self.groups,
            order: order.into_iter(),
            pending: Vec::new().into_iter(),
            tie_mode,
            rng,
            tally: Tally::new(self.num_pos, self.num_neg),
        })
    }

    /// A sweep where all positives come before all negatives.
    pub fn sweep_threshold_best(&self) -> Result<RankedSweep> {
        self.check_both_classes()?;
        let labels = iter::repeat_n(true, self.num_pos as usize)
            .chain(iter::repeat_n(false, self.num_neg as usize))
            .collect_vec();
        Ok(RankedSweep::new(labels, self.num_pos, self.num_neg))
    }

    /// A sweep where all negatives come before all positives.
    pub fn sweep_threshold_worst(&self) -> Result<RankedSweep> {
        self.check_both_classes()?;
        let labels = iter::repeat_n(false, self.num_neg as usize)
            .chain(iter::repeat_n(true, self.num_pos as usize))
            .collect_vec();
        Ok(RankedSweep::new(labels, self.num_pos, self.num_neg))
    }

    /// A sweep over a uniformly random ordering of all instances.
    pub fn sweep_threshold_random(&self, rng: &mut Xoshiro256PlusPlus) -> Result<RankedSweep> {
        self.check_both_classes()?;
        let mut labels = iter::repeat_n(false, self.num_neg as usize)
            .chain(iter::repeat_n(true, self.num_pos as usize))
            .collect_vec();
        labels.shuffle(rng);
        Ok(RankedSweep::new(labels, self.num_pos, self.num_neg))
    }
}

/// Same scores with the same labels, in the same order within each score.
impl PartialEq for ScoredData {
    fn eq(&self, other: &Self) -> bool {
        self.num == other.num
            && self.groups.len() == other.groups.len()
            && self.groups.iter().all(|g| {
                other
                    .index
                    .get(&g.score.to_bits())
                    .is_some_and(|&i| other.groups[i].labels == g.labels)
            })
    }
}

fn read_rank_file<R: BufRead>(reader: R) -> Result<(u64, Vec<i64>)> {
    let data = input::read_integers(reader)?;
    let (&n, ranks) = data
        .split_first()
        .ok_or_else(|| invalid_input("empty rank file".to_owned()))?;
    if n < 0 {
        return Err(invalid_input(format!(
            "number of instances must be non-negative, got {n}"
        )));
    }
    Ok((n as u64, ranks.to_vec()))
}

/// Running confusion counts, kept as exact rationals.
struct Tally {
    num_pos: i64,
    num_neg: i64,
    tp: Rational64,
    fp: Rational64,
    started: bool,
    finished: bool,
}

impl Tally {
    fn new(num_pos: u64, num_neg: u64) -> Tally {
        Tally {
            num_pos: num_pos as i64,
            num_neg: num_neg as i64,
            tp: Rational64::zero(),
            fp: Rational64::zero(),
            started: false,
            finished: false,
        }
    }

    /// `label` is 1 for a positive, 0 for a negative, or a fraction in between.
    fn feed(&mut self, label: Rational64) -> Confusion {
        self.tp += label;
        self.fp += Rational64::from_integer(1) - label;
        self.state()
    }

    fn state(&self) -> Confusion {
        let tn = Rational64::from_integer(self.num_neg) - self.fp;
        let fn_ = Rational64::from_integer(self.num_pos) - self.tp;
        if self.tp.is_integer() {
            Confusion::Exact(Counts {
                tp: self.tp.to_integer() as u64,
                tn: tn.to_integer() as u64,
                fp: self.fp.to_integer() as u64,
                fn_: fn_.to_integer() as u64,
            })
        } else {
            let f = |r: Rational64| r.to_f64().unwrap_or(f64::NAN);
            Confusion::Fractional(Counts {
                tp: f(self.tp),
                tn: f(tn),
                fp: f(self.fp),
                fn_: f(fn_),
            })
        }
    }

    /// Check that everything has been counted once the sweep is over.
    fn finish(&mut self) -> Option<Result<Confusion>> {
        if self.finished {
            return None;
        }
        self.finished = true;
        let tn = Rational64::from_integer(self.num_neg) - self.fp;
        let fn_ = Rational64::from_integer(self.num_pos) - self.tp;
        if tn.is_zero() && fn_.is_zero() {
            None
        } else {
            Some(Err(invariant_violation(format!(
                "sweep ended with TN = {tn} and FN = {fn_}, expected 0 and 0"
            ))))
        }
    }
}

fn as_rational(label: bool) -> Rational64 {
    Rational64::from_integer(label as i64)
}

/// Threshold sweep over [ScoredData], one confusion matrix per instance.
///
/// The first item is the state before any instance is above the threshold.
/// If the final counts are inconsistent, the last item is an error.
pub struct Sweep<'a> {
    groups: &'a [Group],
    order: vec::IntoIter<usize>,
    pending: vec::IntoIter<Rational64>,
    tie_mode: TieMode,
    rng: Xoshiro256PlusPlus,
    tally: Tally,
}

impl Sweep<'_> {
    fn resolve(&mut self, group: &Group) -> Vec<Rational64> {
        if group.tag != GroupLabel::Mixed {
            return group.labels.iter().map(|&l| as_rational(l)).collect_vec();
        }
        match self.tie_mode {
            TieMode::Ignore => group.labels.iter().map(|&l| as_rational(l)).collect_vec(),
            TieMode::Sample => {
                let mut labels = group.labels.clone();
                labels.shuffle(&mut self.rng);
                labels.into_iter().map(as_rational).collect_vec()
            }
            TieMode::Smooth => {
                let n = group.labels.len();
                let pos = group.labels.iter().filter(|&&l| l).count();
                vec![Rational64::new(pos as i64, n as i64); n]
            }
        }
    }
}

impl Iterator for Sweep<'_> {
    type Item = Result<Confusion>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.tally.started {
            self.tally.started = true;
            return Some(Ok(self.tally.state()));
        }
        loop {
            if let Some(label) = self.pending.next() {
                return Some(Ok(self.tally.feed(label)));
            }
            match self.order.next() {
                Some(i) => {
                    let groups = self.groups;
                    self.pending = self.resolve(&groups[i]).into_iter();
                }
                None => return self.tally.finish(),
            }
        }
    }
}

/// A sweep over instances that are already in a fixed order.
pub struct RankedSweep {
    labels: vec::IntoIter<bool>,
    tally: Tally,
}

impl RankedSweep {
    fn new(labels: Vec<bool>, num_pos: u64, num_neg: u64) -> RankedSweep {
        RankedSweep {
            labels: labels.into_iter(),
            tally: Tally::new(num_pos, num_neg),
        }
    }
}

impl Iterator for RankedSweep {
    type Item = Result<Confusion>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.tally.started {
            self.tally.started = true;
            return Some(Ok(self.tally.state()));
        }
        match self.labels.next() {
            Some(label) => Some(Ok(self.tally.feed(as_rational(label)))),
            None => self.tally.finish(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::errors::{InvalidArgument, InvalidInput, InvariantViolation};

    fn exact(tp: u64, tn: u64, fp: u64, fn_: u64) -> Confusion {
        Confusion::Exact(Counts { tp, tn, fp, fn_ })
    }

    fn collect<I: Iterator<Item = Result<Confusion>>>(sweep: I) -> Vec<Confusion> {
        sweep.map(|c| c.unwrap()).collect_vec()
    }

    fn rng() -> Xoshiro256PlusPlus {
        Xoshiro256PlusPlus::seed_from_u64(1234)
    }

    #[test]
    fn add_counts() {
        let mut data = ScoredData::new();
        data.add(0.5, true).unwrap();
        data.add(0.5, true).unwrap();
        assert_eq!(data.mixed_tie_count(), 0);
        data.add(0.5, false).unwrap();
        data.add(0.5, false).unwrap();
        data.add(0.5, true).unwrap();
        data.add(0.1, false).unwrap();
        data.add(-0.0, true).unwrap();
        data.add(0.0, false).unwrap();
        assert_eq!(data.len(), 8);
        assert_eq!(data.positives(), 4);
        assert_eq!(data.negatives(), 4);
        assert_eq!(data.mixed_tie_count(), 2);
        assert!(data.add(f64::NAN, true).is_err());
    }

    #[test]
    fn from_ranks() {
        let data = ScoredData::from_ranks1(&[2, 4], 4).unwrap();
        let expected =
            ScoredData::from_pairs([(0.0, false), (-1.0, true), (-2.0, false), (-3.0, true)])
                .unwrap();
        assert_eq!(data, expected);
        assert_eq!(ScoredData::from_ranks0(&[1, 3], 4).unwrap(), expected);
        assert_ne!(ScoredData::from_ranks0(&[1, 2], 4).unwrap(), expected);
    }

    #[test]
    fn from_ranks_invalid() {
        let e = ScoredData::from_ranks0(&[1, 3, 1], 4).unwrap_err();
        assert!(e.downcast_ref::<InvalidInput>().is_some());
        assert!(ScoredData::from_ranks0(&[4], 4).is_err());
        assert!(ScoredData::from_ranks0(&[-1], 4).is_err());
        assert!(ScoredData::from_ranks1(&[0], 4).is_err());
        assert!(ScoredData::from_ranks1(&[4], 4).is_ok());
    }

    #[test]
    fn read_files() {
        let data = ScoredData::read_from("0.9 1\n0.8 0\n0.7 3\n\n0.7 0\n".as_bytes()).unwrap();
        assert_eq!(data.positives(), 2);
        assert_eq!(data.negatives(), 2);
        assert_eq!(data.mixed_tie_count(), 1);
        let r0 = ScoredData::read_ranks0_from("4\n1 3\n".as_bytes()).unwrap();
        let r1 = ScoredData::read_ranks1_from("4 2\n4".as_bytes()).unwrap();
        assert_eq!(r0, r1);
        assert!(ScoredData::read_ranks0_from("".as_bytes()).is_err());
        assert!(ScoredData::read_ranks0_from("-3".as_bytes()).is_err());
        assert!(ScoredData::read_from("0.9\n".as_bytes()).is_err());
    }

    #[test]
    fn huge_rank_count() {
        let e = ScoredData::read_ranks0_from("4000000000000000000 1".as_bytes()).unwrap_err();
        assert!(e.downcast_ref::<InvalidInput>().is_some());
        let e = ScoredData::from_ranks0(&[0], u64::MAX).unwrap_err();
        assert!(e.downcast_ref::<InvalidInput>().is_some());
    }

    #[test]
    fn parse_tie_mode() {
        assert_eq!("sample".parse::<TieMode>().unwrap(), TieMode::Sample);
        let e = "random".parse::<TieMode>().unwrap_err();
        assert!(e.downcast_ref::<InvalidArgument>().is_some());
    }

    #[test]
    fn sweep_no_ties() {
        let data = ScoredData::from_ranks1(&[2, 4], 4).unwrap();
        for mode in [TieMode::Smooth, TieMode::Ignore, TieMode::Sample] {
            assert_eq!(
                collect(data.sweep_threshold(mode).unwrap()),
                [
                    exact(0, 2, 0, 2),
                    exact(0, 1, 1, 2),
                    exact(1, 1, 1, 1),
                    exact(1, 0, 2, 1),
                    exact(2, 0, 2, 0),
                ]
            );
        }
    }

    #[test]
    fn sweep_needs_both_classes() {
        let data = ScoredData::from_pairs([(1.0, true), (2.0, true)]).unwrap();
        let e = data.sweep_threshold(TieMode::Smooth).err().unwrap();
        assert!(e.downcast_ref::<DegenerateData>().is_some());
        assert!(data.sweep_threshold_best().is_err());
        assert!(data.sweep_threshold_worst().is_err());
        assert!(data.sweep_threshold_random(&mut rng()).is_err());
        assert!(ScoredData::new().sweep_threshold(TieMode::Ignore).is_err());
    }

    #[test]
    fn sweep_smooth_tie() {
        // one positive and three negatives tied in the middle
        let data = ScoredData::from_pairs([
            (3.0, true),
            (2.0, false),
            (2.0, true),
            (2.0, false),
            (2.0, false),
            (1.0, false),
        ])
        .unwrap();
        let states = collect(data.sweep_threshold(TieMode::Smooth).unwrap());
        assert_eq!(states.len(), 7);
        assert_eq!(states[0], exact(0, 4, 0, 2));
        assert_eq!(states[1], exact(1, 4, 0, 1));
        assert_eq!(
            states[2],
            Confusion::Fractional(Counts {
                tp: 1.25,
                tn: 3.25,
                fp: 0.75,
                fn_: 0.75
            })
        );
        assert!(!states[3].is_exact());
        assert_eq!(states[3].to_f64().tp, 1.5);
        assert!(!states[4].is_exact());
        assert_eq!(states[5], exact(2, 1, 3, 0));
        assert_eq!(states[6], exact(2, 0, 4, 0));
    }

    #[test]
    fn sweep_smooth_many_ties() {
        // thirds do not have an exact binary representation
        let mut data = ScoredData::new();
        for i in 0..200 {
            let score = i as f64;
            data.add(score, true).unwrap();
            data.add(score, false).unwrap();
            data.add(score, false).unwrap();
        }
        let states = collect(data.sweep_threshold(TieMode::Smooth).unwrap());
        assert_eq!(states.len(), 601);
        assert_eq!(*states.last().unwrap(), exact(200, 0, 400, 0));
        for (i, s) in states.iter().enumerate() {
            assert_eq!(s.is_exact(), i % 3 == 0, "step {i}");
        }
    }

    #[test]
    fn sweep_ignore_keeps_order() {
        let data =
            ScoredData::from_pairs([(1.0, false), (1.0, true), (0.0, true), (0.0, false)]).unwrap();
        assert_eq!(
            collect(data.sweep_threshold(TieMode::Ignore).unwrap()),
            [
                exact(0, 2, 0, 2),
                exact(0, 1, 1, 2),
                exact(1, 1, 1, 1),
                exact(2, 1, 1, 0),
                exact(2, 0, 2, 0),
            ]
        );
    }

    #[test]
    fn sweep_sample_is_seeded() {
        let mut data = ScoredData::new();
        for i in 0..50 {
            data.add(1.0, i % 2 == 0).unwrap();
        }
        let a = collect(data.sweep_threshold_with_rng(TieMode::Sample, rng()).unwrap());
        let b = collect(data.sweep_threshold_with_rng(TieMode::Sample, rng()).unwrap());
        assert_eq!(a, b);
        assert!(a.iter().all(|s| s.is_exact()));
        assert_eq!(*a.last().unwrap(), exact(25, 0, 25, 0));
    }

    #[test]
    fn sweep_best_worst() {
        let data = ScoredData::from_ranks0(&[1, 2], 5).unwrap();
        assert_eq!(
            collect(data.sweep_threshold_best().unwrap()),
            [
                exact(0, 3, 0, 2),
                exact(1, 3, 0, 1),
                exact(2, 3, 0, 0),
                exact(2, 2, 1, 0),
                exact(2, 1, 2, 0),
                exact(2, 0, 3, 0),
            ]
        );
        assert_eq!(
            collect(data.sweep_threshold_worst().unwrap()),
            [
                exact(0, 3, 0, 2),
                exact(0, 2, 1, 2),
                exact(0, 1, 2, 2),
                exact(0, 0, 3, 2),
                exact(1, 0, 3, 1),
                exact(2, 0, 3, 0),
            ]
        );
    }

    #[test]
    fn sweep_random() {
        let data = ScoredData::from_ranks0(&[0, 4, 7], 10).unwrap();
        let mut r = rng();
        let states = collect(data.sweep_threshold_random(&mut r).unwrap());
        assert_eq!(states.len(), 11);
        assert_eq!(states[0], exact(0, 7, 0, 3));
        assert_eq!(states[10], exact(3, 0, 7, 0));
    }

    #[test]
    fn sweep_restarts() {
        let data = ScoredData::from_ranks0(&[0], 2).unwrap();
        let a = collect(data.sweep_threshold(TieMode::Smooth).unwrap());
        let b = collect(data.sweep_threshold(TieMode::Smooth).unwrap());
        assert_eq!(a, b);
    }

    #[test]
    fn tally_detects_leftovers() {
        let mut sweep = RankedSweep::new(vec![true], 1, 1);
        assert!(sweep.next().unwrap().is_ok());
        assert!(sweep.next().unwrap().is_ok());
        let e = sweep.next().unwrap().unwrap_err();
        assert!(e.downcast_ref::<InvariantViolation>().is_some());
        assert!(sweep.next().is_none());
    }
}
