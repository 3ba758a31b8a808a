use git_bonsai::git::{build_commit_graph, estimate_branches};
use git_bonsai::layout::classify::create_nodes;
use git_bonsai::layout::BonsaiLayout;
use git_bonsai::models::{Branch, BranchMap, Commit, CommitMap, NodeRole};
use git_bonsai::state::BonsaiConfig;
use proptest::prelude::*;

/// A random acyclic history: commit `i` picks parents among `0..i`.
/// `c0` is the only root.
fn history() -> impl Strategy<Value = (CommitMap, BranchMap)> {
    (1usize..40)
        .prop_flat_map(|len| {
            (
                Just(len),
                proptest::collection::vec((any::<prop::sample::Index>(), any::<Option<prop::sample::Index>>()), len),
                proptest::collection::vec(any::<prop::sample::Index>(), 0..4),
            )
        })
        .prop_map(|(len, picks, heads)| {
            let entries: Vec<Commit> = (0..len)
                .rev()
                .map(|i| {
                    let mut parents = Vec::new();
                    if i > 0 {
                        let (first, second) = &picks[i];
                        let first = first.index(i);
                        parents.push(format!("c{first}"));
                        if let Some(second) = second {
                            let second = second.index(i);
                            if second != first {
                                parents.push(format!("c{second}"));
                            }
                        }
                    }
                    Commit::new(format!("c{i}"), parents, format!("commit {i}"), "Prop", i as i64)
                })
                .collect();

            let mut commits = build_commit_graph(entries);
            let mut branches = BranchMap::new();
            branches.insert("main".into(), Branch::new("main", format!("c{}", len - 1), true));
            for (n, head) in heads.iter().enumerate() {
                let name = format!("topic-{n}");
                branches.insert(name.clone(), Branch::new(name, format!("c{}", head.index(len)), false));
            }
            estimate_branches(&mut commits, &branches);

            (commits, branches)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn layout_is_deterministic((commits, branches) in history()) {
        let layout = BonsaiLayout::default();
        let first = layout.generate_layout(&commits, &branches).unwrap();
        let second = layout.generate_layout(&commits, &branches).unwrap();

        prop_assert_eq!(first, second);
    }

    #[test]
    fn layout_stays_inside_canvas((commits, branches) in history()) {
        let config = BonsaiConfig::default();
        let (size, margin) = (config.layout.canvas_size, config.layout.margin);
        let nodes = BonsaiLayout::new(config).generate_layout(&commits, &branches).unwrap();
        let eps = 1e-6;

        for n in &nodes {
            prop_assert!(n.x - n.size >= margin - eps);
            prop_assert!(n.x + n.size <= size - margin + eps);
            prop_assert!(n.y - n.size >= margin - eps);
            prop_assert!(n.y + n.size <= size - margin + eps);
        }
    }

    #[test]
    fn exactly_one_root((commits, branches) in history()) {
        let nodes = BonsaiLayout::default().generate_layout(&commits, &branches).unwrap();
        let roots: Vec<_> = nodes.iter().filter(|n| n.role == NodeRole::Root).collect();

        prop_assert_eq!(roots.len(), 1);
        prop_assert_eq!(roots[0].id.as_str(), "c0");
        prop_assert_eq!(nodes.len(), commits.len());
    }

    #[test]
    fn sizes_respect_caps((commits, branches) in history()) {
        let config = BonsaiConfig::default();
        let leaf_cap = config.layout.base_leaf_size + config.layout.max_leaf_bonus;

        for node in create_nodes(&commits, &branches, &config) {
            match node.role {
                NodeRole::Merge => prop_assert!(node.size <= config.node_size.merge_max),
                NodeRole::Leaf => prop_assert!(node.size <= leaf_cap),
                NodeRole::Root => prop_assert_eq!(node.size, config.node_size.root),
                NodeRole::Trunk => prop_assert_eq!(node.size, config.node_size.trunk),
            }
        }
    }
}
