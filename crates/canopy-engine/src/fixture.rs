//! Reference tree and scenario catalog.
//!
//! The ten-node folder hierarchy and the scenario matrix the engine
//! was originally validated against. External callers with a
//! different target supply their own tree and scenarios; these are
//! the defaults the CLI runs.

use canopy_types::{Level, NodeId, Scenario, Tree, TreeResult};

/// The reference hierarchy:
///
/// ```text
/// Home
/// ├── Desktop      → Notes, Commands
/// ├── Documents    → WorkSpace, Office
/// └── Downloads    → Word File.doc, Excel File.doc
/// ```
pub fn reference_tree() -> TreeResult<Tree> {
    let mut tree = Tree::new();
    tree.add_node("check-home", "Home", Level::Root, None)?;

    let home = NodeId::new("check-home");
    tree.add_node("check-desktop", "Desktop", Level::Branch, Some(&home))?;
    tree.add_node("check-documents", "Documents", Level::Branch, Some(&home))?;
    tree.add_node("check-downloads", "Downloads", Level::Branch, Some(&home))?;

    let desktop = NodeId::new("check-desktop");
    tree.add_node("check-notes", "Notes", Level::Leaf, Some(&desktop))?;
    tree.add_node("check-commands", "Commands", Level::Leaf, Some(&desktop))?;

    let documents = NodeId::new("check-documents");
    tree.add_node("check-workspace", "WorkSpace", Level::Leaf, Some(&documents))?;
    tree.add_node("check-office", "Office", Level::Leaf, Some(&documents))?;

    let downloads = NodeId::new("check-downloads");
    tree.add_node("check-wordfile", "Word File.doc", Level::Leaf, Some(&downloads))?;
    tree.add_node("check-excelfile", "Excel File.doc", Level::Leaf, Some(&downloads))?;

    Ok(tree)
}

/// The reference scenario matrix, as data.
///
/// Covers single-leaf isolation for every leaf, cascade-up from each
/// complete sibling pair, cascade-down from each branch, the full-tree
/// root selection, and cascade-up to the root from all branches.
pub fn reference_scenarios() -> Vec<Scenario> {
    let mut scenarios = Vec::new();

    for leaf in [
        "Notes",
        "Commands",
        "WorkSpace",
        "Office",
        "Word File.doc",
        "Excel File.doc",
    ] {
        scenarios.push(Scenario::new(format!("single leaf: {}", leaf)).target(leaf));
    }

    scenarios.push(
        Scenario::new("sibling pair cascades up: Desktop").targets(["Notes", "Commands"]),
    );
    scenarios.push(
        Scenario::new("sibling pair cascades up: Documents").targets(["WorkSpace", "Office"]),
    );
    scenarios.push(
        Scenario::new("sibling pair cascades up: Downloads")
            .targets(["Word File.doc", "Excel File.doc"]),
    );

    for branch in ["Desktop", "Documents", "Downloads"] {
        scenarios.push(
            Scenario::new(format!("branch cascades down: {}", branch)).target(branch),
        );
    }

    scenarios.push(Scenario::new("full tree from root").target("Home"));
    scenarios.push(
        Scenario::new("all branches cascade up to root")
            .targets(["Desktop", "Documents", "Downloads"]),
    );

    scenarios
}
