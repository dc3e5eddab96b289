use std::collections::HashMap;

use super::record::{ReportNode, ReportRecord};

/// Whether organization roots should be wrapped into one consolidated node.
///
/// Only an "all organizations" view over more than one organization is
/// consolidated; a single organization is shown as is.
pub fn should_consolidate(all_organizations: bool, organization_count: usize) -> bool {
    all_organizations && organization_count > 1
}

/// Where a row ends up after the placement pass
enum Placement {
    /// Top-level root (no parent, or a parent missing from the snapshot)
    Root,
    /// Organization root moved under the consolidated node
    Consolidated,
    /// Child of the row with the given index
    Child(usize),
}

/// Build a forest of report nodes from flat rows.
///
/// Rows are attached to the row named by their `parent_id`. A row whose
/// parent is absent from the snapshot becomes a root instead of being
/// dropped. Children keep the relative order of the input.
///
/// With `consolidate` every organization root (a row without `parent_id`) is
/// renamed to `"{organization} - {name}"` and placed under a synthetic
/// [`CONSOLIDATED_TOTAL_ID`](super::record::CONSOLIDATED_TOTAL_ID) node whose
/// measures are the sum of the organization roots flagged `is_total_row`.
/// The consolidated node comes first; rows with a dangling `parent_id` follow
/// it as separate roots.
///
/// Rows that are only reachable through a `parent_id` cycle never hang off a
/// root and are left out of the result.
pub fn build_hierarchy<R: ReportRecord>(rows: Vec<R>, consolidate: bool) -> Vec<ReportNode<R>> {
    if rows.is_empty() {
        return Vec::new();
    }

    // id -> position; the first row wins for duplicated ids
    let mut index: HashMap<String, usize> = HashMap::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        index.entry(row.id().to_string()).or_insert(i);
    }

    let placements: Vec<Placement> = rows
        .iter()
        .map(|row| match row.parent_id() {
            Some(parent) => match index.get(parent) {
                Some(&parent_idx) => Placement::Child(parent_idx),
                None => Placement::Root,
            },
            None if consolidate => Placement::Consolidated,
            None => Placement::Root,
        })
        .collect();

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); rows.len()];
    let mut roots: Vec<usize> = Vec::new();
    let mut organization_roots: Vec<usize> = Vec::new();
    for (i, placement) in placements.iter().enumerate() {
        match placement {
            Placement::Root => roots.push(i),
            Placement::Consolidated => organization_roots.push(i),
            Placement::Child(parent_idx) => children[*parent_idx].push(i),
        }
    }

    let mut slots: Vec<Option<R>> = rows.into_iter().map(Some).collect();

    let consolidated = if organization_roots.is_empty() {
        None
    } else {
        let mut total = R::consolidated_total();
        for &i in &organization_roots {
            if let Some(row) = slots[i].as_mut() {
                if row.is_total_row() {
                    total.accumulate(row);
                }
                if let Some(org_name) = row.organization_name().map(str::to_string) {
                    let name = format!("{} - {}", org_name, row.display_name());
                    row.set_display_name(name);
                }
            }
        }
        Some(total)
    };

    let mut result = Vec::with_capacity(roots.len() + 1);
    if let Some(total) = consolidated {
        let org_nodes = organization_roots
            .iter()
            .filter_map(|&i| assemble(i, &mut slots, &children))
            .collect();
        result.push(ReportNode {
            row: total,
            children: org_nodes,
        });
    }
    result.extend(
        roots
            .iter()
            .filter_map(|&i| assemble(i, &mut slots, &children)),
    );
    result
}

/// Move the row at `idx` and its whole sub-tree out of `slots`
fn assemble<R>(idx: usize, slots: &mut [Option<R>], children: &[Vec<usize>]) -> Option<ReportNode<R>> {
    let row = slots[idx].take()?;
    let kids = children[idx]
        .iter()
        .filter_map(|&child| assemble(child, slots, children))
        .collect();
    Some(ReportNode {
        row,
        children: kids,
    })
}

/// A node visited by [`flatten`] together with its depth (roots are 0)
#[derive(Debug, Clone, Copy)]
pub struct FlatNode<'a, R> {
    pub depth: usize,
    pub node: &'a ReportNode<R>,
}

/// Depth-first, pre-order walk over the forest
pub fn flatten<R>(nodes: &[ReportNode<R>]) -> Vec<FlatNode<'_, R>> {
    let mut out = Vec::new();
    let mut stack: Vec<(usize, &ReportNode<R>)> =
        nodes.iter().rev().map(|node| (0, node)).collect();
    while let Some((depth, node)) = stack.pop() {
        out.push(FlatNode { depth, node });
        stack.extend(node.children.iter().rev().map(|child| (depth + 1, child)));
    }
    out
}

pub fn count_nodes<R>(nodes: &[ReportNode<R>]) -> usize {
    flatten(nodes).len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::common::record::{RowHeader, CONSOLIDATED_TOTAL_ID};
    use crate::reports::r500_cash_bank::CashBankRow;
    use std::collections::HashSet;

    fn row(id: &str, parent: Option<&str>, balance: f64) -> CashBankRow {
        CashBankRow {
            header: RowHeader::new(id, parent),
            account_name: format!("Account {}", id),
            closing_balance: balance,
            ..Default::default()
        }
    }

    fn org_root(id: &str, org: &str, balance: f64, is_total: bool) -> CashBankRow {
        let mut r = row(id, None, balance);
        r.header.organization_id = Some(format!("org-{}", id));
        r.header.organization_name = Some(org.to_string());
        r.header.is_total_row = is_total;
        r.account_name = "Денежные средства".to_string();
        r
    }

    fn ids<R: ReportRecord>(nodes: &[ReportNode<R>]) -> Vec<String> {
        nodes.iter().map(|n| n.id().to_string()).collect()
    }

    #[test]
    fn test_single_root_with_ordered_children() {
        let mut a = row("A", None, 100.0);
        a.header.is_total_row = true;
        let rows = vec![a, row("B", Some("A"), 40.0), row("C", Some("A"), 60.0)];

        let tree = build_hierarchy(rows, false);

        assert_eq!(ids(&tree), vec!["A"]);
        assert_eq!(ids(&tree[0].children), vec!["B", "C"]);
        assert!(tree[0].children.iter().all(|c| c.children.is_empty()));
    }

    #[test]
    fn test_consolidates_organization_roots() {
        let rows = vec![
            org_root("O1", "X", 100.0, true),
            org_root("O2", "Y", 50.0, true),
        ];

        let tree = build_hierarchy(rows, true);

        assert_eq!(tree.len(), 1);
        let total = &tree[0];
        assert_eq!(total.id(), CONSOLIDATED_TOTAL_ID);
        assert!(total.row.header.is_total_row);
        assert_eq!(total.row.closing_balance, 150.0);
        assert_eq!(ids(&total.children), vec!["O1", "O2"]);
        assert_eq!(total.children[0].row.account_name, "X - Денежные средства");
        assert_eq!(total.children[1].row.account_name, "Y - Денежные средства");
    }

    #[test]
    fn test_consolidated_sum_skips_non_total_roots() {
        let rows = vec![
            org_root("O1", "X", 100.0, true),
            org_root("O2", "Y", 50.0, false),
            org_root("O3", "Z", 25.0, true),
        ];

        let tree = build_hierarchy(rows, true);

        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].row.closing_balance, 125.0);
        // non-total roots are still shown
        assert_eq!(tree[0].children.len(), 3);
    }

    #[test]
    fn test_consolidation_keeps_subtrees() {
        let rows = vec![
            org_root("O1", "X", 100.0, true),
            row("O1-bank", Some("O1"), 70.0),
            org_root("O2", "Y", 50.0, true),
            row("O1-cash", Some("O1"), 30.0),
            row("O2-bank", Some("O2"), 50.0),
        ];

        let tree = build_hierarchy(rows, true);

        let total = &tree[0];
        assert_eq!(ids(&total.children[0].children), vec!["O1-bank", "O1-cash"]);
        assert_eq!(ids(&total.children[1].children), vec!["O2-bank"]);
        // children are not renamed and not summed
        assert_eq!(total.children[0].children[0].row.account_name, "Account O1-bank");
        assert_eq!(total.row.closing_balance, 150.0);
    }

    #[test]
    fn test_dangling_parent_becomes_root() {
        for consolidate in [false, true] {
            let tree = build_hierarchy(vec![row("Z", Some("missing"), 10.0)], consolidate);
            assert_eq!(ids(&tree), vec!["Z"], "consolidate = {}", consolidate);
            assert_eq!(tree[0].row.account_name, "Account Z");
        }
    }

    #[test]
    fn test_dangling_rows_follow_consolidated_node() {
        let rows = vec![
            row("Z", Some("missing"), 10.0),
            org_root("O1", "X", 100.0, true),
            org_root("O2", "Y", 50.0, true),
        ];

        let tree = build_hierarchy(rows, true);

        assert_eq!(ids(&tree), vec![CONSOLIDATED_TOTAL_ID, "Z"]);
        assert_eq!(tree[0].row.closing_balance, 150.0);
    }

    #[test]
    fn test_no_synthetic_node_without_consolidation() {
        let rows = vec![
            org_root("O1", "X", 100.0, true),
            org_root("O2", "Y", 50.0, true),
        ];

        let tree = build_hierarchy(rows, false);

        assert_eq!(ids(&tree), vec!["O1", "O2"]);
        assert_eq!(tree[0].row.account_name, "Денежные средства");
        assert!(flatten(&tree).iter().all(|flat| flat.node.id() != CONSOLIDATED_TOTAL_ID));
    }

    #[test]
    fn test_empty_input() {
        assert!(build_hierarchy(Vec::<CashBankRow>::new(), false).is_empty());
        assert!(build_hierarchy(Vec::<CashBankRow>::new(), true).is_empty());
    }

    #[test]
    fn test_empty_parent_id_is_root() {
        let tree = build_hierarchy(vec![row("A", Some(""), 1.0)], false);
        assert_eq!(ids(&tree), vec!["A"]);
    }

    #[test]
    fn test_missing_organization_name_keeps_display_name() {
        let mut r = row("O1", None, 10.0);
        r.header.is_total_row = true;
        let tree = build_hierarchy(vec![r, org_root("O2", "Y", 5.0, true)], true);
        assert_eq!(tree[0].children[0].row.account_name, "Account O1");
        assert_eq!(tree[0].row.closing_balance, 15.0);
    }

    #[test]
    fn test_every_row_appears_exactly_once() {
        let rows = vec![
            org_root("O1", "X", 10.0, true),
            row("a", Some("O1"), 1.0),
            row("b", Some("a"), 1.0),
            row("c", Some("b"), 1.0),
            row("d", Some("O1"), 1.0),
            org_root("O2", "Y", 5.0, true),
            row("e", Some("O2"), 1.0),
            row("f", Some("nowhere"), 1.0),
        ];
        let expected: HashSet<String> = rows.iter().map(|r| r.header.id.clone()).collect();

        for consolidate in [false, true] {
            let tree = build_hierarchy(rows.clone(), consolidate);
            let seen: Vec<String> = flatten(&tree)
                .into_iter()
                .map(|f| f.node.id().to_string())
                .filter(|id| id != CONSOLIDATED_TOTAL_ID)
                .collect();
            assert_eq!(seen.len(), expected.len());
            assert_eq!(seen.into_iter().collect::<HashSet<_>>(), expected);
        }
    }

    #[test]
    fn test_children_declared_before_parent() {
        let rows = vec![row("child", Some("parent"), 1.0), row("parent", None, 2.0)];
        let tree = build_hierarchy(rows, false);
        assert_eq!(ids(&tree), vec!["parent"]);
        assert_eq!(ids(&tree[0].children), vec!["child"]);
    }

    #[test]
    fn test_cycle_members_are_left_out() {
        let rows = vec![
            row("root", None, 1.0),
            row("x", Some("y"), 1.0),
            row("y", Some("x"), 1.0),
            row("self", Some("self"), 1.0),
        ];
        let tree = build_hierarchy(rows, false);
        assert_eq!(ids(&tree), vec!["root"]);
        assert_eq!(count_nodes(&tree), 1);
    }

    #[test]
    fn test_flatten_is_preorder_with_depth() {
        let rows = vec![
            row("A", None, 0.0),
            row("B", Some("A"), 0.0),
            row("C", Some("B"), 0.0),
            row("D", Some("A"), 0.0),
            row("E", None, 0.0),
        ];
        let tree = build_hierarchy(rows, false);
        let walk: Vec<(usize, String)> = flatten(&tree)
            .into_iter()
            .map(|f| (f.depth, f.node.id().to_string()))
            .collect();
        assert_eq!(
            walk,
            vec![
                (0, "A".to_string()),
                (1, "B".to_string()),
                (2, "C".to_string()),
                (1, "D".to_string()),
                (0, "E".to_string()),
            ]
        );
        assert_eq!(tree[0].children[0].children[0].row.account_name, "Account C");
    }

    #[test]
    fn test_should_consolidate() {
        assert!(should_consolidate(true, 2));
        assert!(!should_consolidate(true, 1));
        assert!(!should_consolidate(false, 5));
    }
}
