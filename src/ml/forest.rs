// ============================================================
// Layer 5 — Random Forest
// ============================================================
// An ensemble of CART decision trees voting on the class of a
// frequency vector.
//
//   training rows ──bootstrap──► tree 1 ─┐
//                 ──bootstrap──► tree 2 ─┼──► majority vote
//                 ──bootstrap──► tree n ─┘
//
// Each tree:
//   - trains on n rows drawn with replacement from the n rows
//   - at every node looks at √features randomly chosen features
//     (more if none of those can split the node)
//   - picks the feature/threshold with the lowest weighted Gini
//     impurity, the threshold being the midpoint of two adjacent
//     distinct values
//   - stops at pure nodes, nodes under min_samples_split rows,
//     or max_depth
//
// Gini impurity of a node with class proportions p_i:
//   G = 1 - Σ p_i²          (0 = pure, higher = more mixed)
//
// Vote ties, in leaves and across trees, go to the lowest label.
//
// Reference: Breiman (2001) Random Forests
//            Breiman et al. (1984) Classification and Regression Trees

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::domain::error::{PipelineError, PipelineResult};

pub const DEFAULT_TREES: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForestParams {
    pub n_trees:           usize,
    pub max_depth:         Option<usize>,
    pub min_samples_split: usize,
    /// Features considered per split; `None` means √width
    pub max_features:      Option<usize>,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees:           DEFAULT_TREES,
            max_depth:         None,
            min_samples_split: 2,
            max_features:      None,
        }
    }
}

impl ForestParams {
    fn features_per_split(&self, width: usize) -> usize {
        let m = self
            .max_features
            .unwrap_or_else(|| (width as f64).sqrt() as usize);
        m.clamp(1, width.max(1))
    }
}

// ─── Decision Tree ────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        label: usize,
    },
    Split {
        feature:   usize,
        threshold: f64,
        left:      Box<Node>,
        right:     Box<Node>,
    },
}

#[derive(Debug, Clone)]
pub struct DecisionTree {
    root: Node,
}

struct BestSplit {
    feature:   usize,
    threshold: f64,
    impurity:  f64,
}

/// Training state shared by every node of one tree
struct Grower<'a, R: Rng + ?Sized> {
    rows:      &'a [&'a [f64]],
    labels:    &'a [usize],
    n_classes: usize,
    params:    &'a ForestParams,
    m:         usize,
    features:  Vec<usize>,
    rng:       &'a mut R,
}

impl DecisionTree {
    /// Grows a tree on `rows[i]` labelled `labels[i]`.
    pub fn fit<R: Rng + ?Sized>(
        rows:      &[&[f64]],
        labels:    &[usize],
        n_classes: usize,
        params:    &ForestParams,
        rng:       &mut R,
    ) -> PipelineResult<Self> {
        validate_training_set(rows, labels, n_classes)?;

        let width = rows[0].len();
        let mut grower = Grower {
            rows,
            labels,
            n_classes,
            params,
            m: params.features_per_split(width),
            features: (0..width).collect(),
            rng,
        };
        let root = grower.grow((0..rows.len()).collect(), 0);
        Ok(Self { root })
    }

    pub fn predict(&self, row: &[f64]) -> usize {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { label } => return *label,
                Node::Split { feature, threshold, left, right } => {
                    // Rows shorter than the training width fall to the left
                    let value = row.get(*feature).copied().unwrap_or(f64::NEG_INFINITY);
                    node = if value <= *threshold { left } else { right };
                }
            }
        }
    }

    pub fn depth(&self) -> usize {
        fn depth_of(node: &Node) -> usize {
            match node {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => 1 + depth_of(left).max(depth_of(right)),
            }
        }
        depth_of(&self.root)
    }
}

impl<R: Rng + ?Sized> Grower<'_, R> {
    fn grow(&mut self, indices: Vec<usize>, depth: usize) -> Node {
        let counts = self.class_counts(&indices);
        let label  = majority(&counts);

        let pure        = counts.iter().filter(|&&c| c > 0).count() <= 1;
        let too_small   = indices.len() < self.params.min_samples_split.max(2);
        let depth_limit = self.params.max_depth.is_some_and(|max| depth >= max);
        if pure || too_small || depth_limit {
            return Node::Leaf { label };
        }

        let Some(best) = self.best_split(&indices) else {
            return Node::Leaf { label };
        };

        let (left, right): (Vec<usize>, Vec<usize>) = indices
            .into_iter()
            .partition(|&i| self.rows[i][best.feature] <= best.threshold);

        Node::Split {
            feature:   best.feature,
            threshold: best.threshold,
            left:      Box::new(self.grow(left, depth + 1)),
            right:     Box::new(self.grow(right, depth + 1)),
        }
    }

    /// Visits features in random order until `m` of them could split
    /// the node, keeping the lowest impurity seen.
    fn best_split(&mut self, indices: &[usize]) -> Option<BestSplit> {
        self.features.shuffle(&mut *self.rng);

        let mut best: Option<BestSplit> = None;
        let mut usable = 0;
        for pos in 0..self.features.len() {
            if usable >= self.m {
                break;
            }
            let feature = self.features[pos];
            if let Some(candidate) = self.split_on(feature, indices) {
                usable += 1;
                if best.as_ref().map_or(true, |b| candidate.impurity < b.impurity) {
                    best = Some(candidate);
                }
            }
        }
        best
    }

    /// Lowest weighted Gini threshold on one feature, or `None` when
    /// the feature is constant over the node.
    fn split_on(&self, feature: usize, indices: &[usize]) -> Option<BestSplit> {
        let mut pairs: Vec<(f64, usize)> = indices
            .iter()
            .map(|&i| (self.rows[i][feature], self.labels[i]))
            .collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

        let n = pairs.len();
        let mut left  = vec![0usize; self.n_classes];
        let mut right = vec![0usize; self.n_classes];
        for &(_, label) in &pairs {
            right[label] += 1;
        }

        let mut best: Option<BestSplit> = None;
        for i in 0..n - 1 {
            let (value, label) = pairs[i];
            left[label]  += 1;
            right[label] -= 1;

            let next = pairs[i + 1].0;
            if next <= value {
                continue;
            }

            let n_left   = i + 1;
            let n_right  = n - n_left;
            let impurity = (n_left as f64 * gini(&left, n_left)
                + n_right as f64 * gini(&right, n_right))
                / n as f64;

            if best.as_ref().map_or(true, |b| impurity < b.impurity) {
                best = Some(BestSplit {
                    feature,
                    threshold: value + (next - value) / 2.0,
                    impurity,
                });
            }
        }
        best
    }

    fn class_counts(&self, indices: &[usize]) -> Vec<usize> {
        let mut counts = vec![0usize; self.n_classes];
        for &i in indices {
            counts[self.labels[i]] += 1;
        }
        counts
    }
}

fn gini(counts: &[usize], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    1.0 - counts
        .iter()
        .map(|&c| {
            let p = c as f64 / total;
            p * p
        })
        .sum::<f64>()
}

/// Index of the largest count; ties go to the lowest index.
fn majority(counts: &[usize]) -> usize {
    let mut best = 0;
    for (label, &count) in counts.iter().enumerate() {
        if count > counts[best] {
            best = label;
        }
    }
    best
}

fn validate_training_set(rows: &[&[f64]], labels: &[usize], n_classes: usize) -> PipelineResult<()> {
    if rows.is_empty() {
        return Err(PipelineError::ConfigMismatch("cannot fit on an empty training set".into()));
    }
    if rows.len() != labels.len() {
        return Err(PipelineError::ConfigMismatch(format!(
            "{} rows but {} labels",
            rows.len(),
            labels.len()
        )));
    }
    if let Some(&label) = labels.iter().find(|&&l| l >= n_classes) {
        return Err(PipelineError::ConfigMismatch(format!(
            "label {label} outside the {n_classes} classes"
        )));
    }
    let width = rows[0].len();
    if rows.iter().any(|r| r.len() != width) {
        return Err(PipelineError::ConfigMismatch("training rows differ in width".into()));
    }
    Ok(())
}

// ─── Random Forest ────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct RandomForest {
    trees:     Vec<DecisionTree>,
    n_classes: usize,
}

impl RandomForest {
    /// Trains `params.n_trees` trees, each on its own bootstrap sample
    /// and its own RNG stream derived from `seed`.
    pub fn fit(
        rows:      &[&[f64]],
        labels:    &[usize],
        n_classes: usize,
        params:    &ForestParams,
        seed:      u64,
    ) -> PipelineResult<Self> {
        if params.n_trees == 0 {
            return Err(PipelineError::ConfigMismatch("a forest needs at least 1 tree".into()));
        }
        validate_training_set(rows, labels, n_classes)?;

        let mut master = ChaCha8Rng::seed_from_u64(seed);
        let n = rows.len();
        let mut trees = Vec::with_capacity(params.n_trees);

        for _ in 0..params.n_trees {
            let mut rng = ChaCha8Rng::seed_from_u64(master.gen());

            let picks: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
            let boot_rows: Vec<&[f64]> = picks.iter().map(|&i| rows[i]).collect();
            let boot_labels: Vec<usize> = picks.iter().map(|&i| labels[i]).collect();

            trees.push(DecisionTree::fit(&boot_rows, &boot_labels, n_classes, params, &mut rng)?);
        }

        tracing::debug!(
            "Forest of {} trees on {} rows, max depth {}",
            trees.len(),
            n,
            trees.iter().map(DecisionTree::depth).max().unwrap_or(0)
        );
        Ok(Self { trees, n_classes })
    }

    pub fn predict(&self, row: &[f64]) -> usize {
        let mut votes = vec![0usize; self.n_classes];
        for tree in &self.trees {
            votes[tree.predict(row)] += 1;
        }
        majority(&votes)
    }
}
