//! Catalogs list instances together with what is known about them, one instance per line:
//!
//! ```text
//! name,relaxObj,bestBound,mipBound,optimal
//! ```
//!
//! The fields after the name are the expectation arguments of `mipcheck`. Blank lines and lines
//! starting with `#` are skipped, as are any fields after the fifth.

use std::path::Path;
use std::path::PathBuf;

use mipcheck::expectation::Expectation;
use mipcheck::expectation::ExpectationError;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// The number of instances verified by a single batch.
pub(crate) const DEFAULT_BATCH_SIZE: usize = 15;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Entry {
    pub(crate) name: String,
    pub(crate) relax_obj: String,
    pub(crate) best_bound: String,
    pub(crate) mip_bound: String,
    pub(crate) optimal: String,
}

impl Entry {
    pub(crate) fn expectation(&self) -> Result<Expectation, ExpectationError> {
        Expectation::from_tokens(
            &self.relax_obj,
            &self.best_bound,
            &self.mip_bound,
            &self.optimal,
        )
    }

    /// The transcript of this instance in `directory`.
    pub(crate) fn instance_path(&self, directory: &Path) -> PathBuf {
        directory.join(format!("{}.json", self.name))
    }

    /// The positional arguments of a `mipcheck` invocation for this instance.
    pub(crate) fn arguments(&self, directory: &Path) -> String {
        format!(
            "{} {} {} {} {}",
            self.instance_path(directory).display(),
            self.relax_obj,
            self.best_bound,
            self.mip_bound,
            self.optimal
        )
    }
}

pub(crate) fn parse(text: &str) -> anyhow::Result<Vec<Entry>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty() && !line.trim_start().starts_with('#'))
        .map(|(index, line)| {
            let fields: Vec<_> = line.split(',').map(str::trim).collect();

            let [name, relax_obj, best_bound, mip_bound, optimal, ..] = fields.as_slice() else {
                anyhow::bail!(
                    "Line {} has {} fields, but at least 5 are needed.",
                    index + 1,
                    fields.len()
                );
            };

            if name.is_empty() {
                anyhow::bail!("Line {} has no instance name.", index + 1);
            }

            Ok(Entry {
                name: (*name).to_owned(),
                relax_obj: (*relax_obj).to_owned(),
                best_bound: (*best_bound).to_owned(),
                mip_bound: (*mip_bound).to_owned(),
                optimal: (*optimal).to_owned(),
            })
        })
        .collect()
}

/// Shuffle the entries, reproducibly if a seed is given.
pub(crate) fn shuffle(entries: &mut [Entry], seed: Option<u64>) {
    let mut rng = match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };

    entries.shuffle(&mut rng);
}

/// Split the entries into consecutive batches of `size` entries. The last batch may be smaller.
pub(crate) fn batches(entries: &[Entry], size: usize) -> anyhow::Result<Vec<&[Entry]>> {
    if size == 0 {
        anyhow::bail!("The batch size must be positive.");
    }

    Ok(entries.chunks(size).collect())
}

#[cfg(test)]
mod tests {
    use mipcheck::expectation::MipExpectation;

    use super::*;

    const CATALOG: &str = "\
# name,relaxObj,bestBound,mipBound,optimal
p0033,2520.57,3089,3089,True

markshare_4_0, 0, 1, 1, False, extra
infeasible_pair,inf,inf,inf,False
";

    fn names(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|entry| entry.name.as_str()).collect()
    }

    #[test]
    fn entries_are_parsed() {
        let entries = parse(CATALOG).expect("valid catalog");

        assert_eq!(names(&entries), ["p0033", "markshare_4_0", "infeasible_pair"]);
        assert_eq!(entries[1].optimal, "False");
        assert_eq!(
            entries[0].expectation().expect("valid expectation").mip,
            MipExpectation::Optimal(3089.0)
        );
        assert!(entries[2]
            .expectation()
            .expect("valid expectation")
            .mip
            .is_infeasible());
    }

    #[test]
    fn short_lines_are_rejected() {
        let error = parse("p0033,1,2,3\n").expect_err("missing optimal");

        assert!(error.to_string().contains("Line 1"));
    }

    #[test]
    fn arguments_follow_the_command_line() {
        let entries = parse("p0033,2520.57,3089,3089,True").expect("valid catalog");

        assert_eq!(
            entries[0].arguments(Path::new("instances")),
            format!(
                "{} 2520.57 3089 3089 True",
                Path::new("instances").join("p0033.json").display()
            )
        );
    }

    #[test]
    fn batches_cover_every_entry_once() {
        let text: String = (0..32).map(|i| format!("i{i},1,1,1,True\n")).collect();
        let entries = parse(&text).expect("valid catalog");

        let batches = batches(&entries, DEFAULT_BATCH_SIZE).expect("positive size");

        assert_eq!(
            batches.iter().map(|batch| batch.len()).collect::<Vec<_>>(),
            [15, 15, 2]
        );
        let _ = super::batches(&entries, 0).expect_err("empty batches");
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let text: String = (0..20).map(|i| format!("i{i},1,1,1,True\n")).collect();
        let mut first = parse(&text).expect("valid catalog");
        let mut second = first.clone();

        shuffle(&mut first, Some(7));
        shuffle(&mut second, Some(7));

        assert_eq!(first, second);
        assert_eq!(first.len(), 20);
    }
}
