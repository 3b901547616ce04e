use std::path::Path;

#[test]
fn keeps_mod_rs_roots_for_split_modules() {
    let src = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
    let flat_roots = [
        "models.rs",
        "governance.rs",
        "provider.rs",
        "provider/resources.rs",
        "provider/resources/campaign.rs",
    ];

    let stale_files: Vec<&str> = flat_roots
        .iter()
        .copied()
        .filter(|path| src.join(path).exists())
        .collect();

    assert!(
        stale_files.is_empty(),
        "flat module roots found: {stale_files:?}; keep only mod.rs roots for models/governance/provider",
    );
}
