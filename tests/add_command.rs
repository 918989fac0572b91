//! End-to-end tests for `design-agents add`.

mod common;

use common::TestContext;
use predicates::prelude::*;

#[test]
fn installs_design_system_bundle() {
    let ctx = TestContext::new();
    ctx.write_package_json("@vibe/core");

    ctx.cli()
        .args(["add", "design-system"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Installing into"))
        .stdout(predicate::str::contains(
            "[project_folder] = vibe  [project_name] = Vibe  [style_package] = vibe-style",
        ))
        .stdout(predicate::str::contains(
            "design-system: rule installed, agent installed, 2 sub-rule(s) installed, 0 skipped",
        ));

    let rule = ctx.read(".cursor/rules/design-system.mdc");
    assert!(rule.contains("Use Vibe's design tokens from vibe-style."));
    assert!(rule.contains("@vibe/core"));
    assert!(!rule.contains("[project_folder]"));
    assert!(!rule.contains("[project_name]"));
    assert!(!rule.contains("[style_package]"));

    assert!(ctx.read(".cursor/agents/design-system.md").contains("Vibe"));
    assert!(ctx.exists(".cursor/rules/design-system/design-tokens.mdc"));
    assert!(ctx.exists(".cursor/rules/design-system/component-structure.mdc"));
}

#[test]
fn second_run_skips_and_preserves_local_edits() {
    let ctx = TestContext::new();
    ctx.cli().args(["add", "design-system"]).assert().success();

    ctx.write_file(".cursor/rules/design-system.mdc", "locally tuned\n");

    ctx.cli()
        .args(["add", "design-system"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "design-system: rule skipped (exists), agent skipped (exists), \
             0 sub-rule(s) installed, 2 skipped",
        ));

    assert_eq!(ctx.read(".cursor/rules/design-system.mdc"), "locally tuned\n");
}

#[test]
fn overwrite_restores_shipped_content() {
    let ctx = TestContext::new();
    ctx.write_package_json("@vibe/core");
    ctx.cli().args(["add", "design-system"]).assert().success();
    ctx.write_file(".cursor/rules/design-system.mdc", "locally tuned\n");

    ctx.cli()
        .args(["add", "design-system", "--overwrite"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Overwrite: yes"))
        .stdout(predicate::str::contains(
            "design-system: rule installed, agent installed, 2 sub-rule(s) installed, 0 skipped",
        ));

    assert!(
        ctx.read(".cursor/rules/design-system.mdc")
            .contains("Use Vibe's design tokens from vibe-style.")
    );
}

#[test]
fn explicit_overrides_beat_package_json() {
    let ctx = TestContext::new();
    ctx.write_package_json("@vibe/core");

    ctx.cli()
        .args([
            "add",
            "design-system",
            "--project-name",
            "@acme/ui",
            "--style-package",
            "acme-tokens",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[project_folder] = acme  [project_name] = Acme  [style_package] = acme-tokens",
        ));

    let rule = ctx.read(".cursor/rules/design-system.mdc");
    assert!(rule.contains("Use Acme's design tokens from acme-tokens."));
    assert!(rule.contains("@acme/core"));
}

#[test]
fn malformed_package_json_falls_back_to_directory_name() {
    let ctx = TestContext::named("storefront");
    ctx.write_file("package.json", "{ not json");

    ctx.cli()
        .args(["add", "accessibility"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[project_folder] = storefront  [project_name] = Storefront  \
             [style_package] = storefront-style",
        ));
}

#[test]
fn rule_only_agent_creates_no_doc_or_sub_rule_paths() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["add", "accessibility"])
        .assert()
        .success()
        .stdout(predicate::str::contains("accessibility: rule installed\n"));

    assert!(ctx.exists(".cursor/rules/accessibility.mdc"));
    assert!(!ctx.exists(".cursor/agents"));
    assert!(!ctx.exists(".cursor/rules/accessibility"));
}

#[test]
fn unknown_slugs_warn_but_do_not_fail_the_run() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["add", "design-system", "no-such-agent"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Unknown agent(s): no-such-agent"));

    assert!(ctx.exists(".cursor/rules/design-system.mdc"));
}

#[test]
fn refuses_when_no_requested_slug_is_known() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["add", "nope", "also-nope"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No valid agent slugs: nope, also-nope"));

    assert!(!ctx.exists(".cursor"));
}

#[test]
fn bare_add_lists_available_agents() {
    let ctx = TestContext::new();

    ctx.cli()
        .arg("add")
        .assert()
        .success()
        .stdout(predicate::str::contains("Available agents:"))
        .stdout(predicate::str::contains("design-system"));

    assert!(!ctx.exists(".cursor"));
}

#[test]
fn missing_target_directory_is_an_error() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["add", "design-system", "--target", "does-not-exist"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Target directory does not exist:"));

    assert!(!ctx.exists(".cursor"));
}

#[test]
fn project_flag_is_an_alias_for_target() {
    let ctx = TestContext::new();
    let elsewhere = ctx.project().parent().unwrap().join("elsewhere");
    std::fs::create_dir_all(&elsewhere).unwrap();

    ctx.cli().args(["a", "accessibility", "--project"]).arg(&elsewhere).assert().success();

    assert!(elsewhere.join(".cursor/rules/accessibility.mdc").is_file());
    assert!(!ctx.exists(".cursor"));
}

#[test]
fn duplicate_slugs_install_once_then_skip() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["add", "accessibility", "accessibility"])
        .assert()
        .success()
        .stdout(predicate::str::contains("accessibility: rule installed\n"))
        .stdout(predicate::str::contains("accessibility: rule skipped (exists)\n"));
}

fn seed_demo_catalog(ctx: &TestContext) {
    ctx.write_catalog_manifest(
        r#"{ "agents": [
            { "slug": "demo", "name": "Demo Agent" },
            { "slug": "broken", "name": "Broken Agent" }
        ] }"#,
    );
    ctx.write_catalog_file("demo/rule.mdc", "Demo rule for [project_name]\n");
    ctx.write_catalog_file("demo/rules/one.mdc", "one\n");
    ctx.write_catalog_file("broken/agent.md", "doc without a rule\n");
}

#[test]
fn agents_dir_catalog_installs_like_the_embedded_one() {
    let ctx = TestContext::named("shop");
    seed_demo_catalog(&ctx);

    ctx.cli()
        .args(["add", "demo", "--agents-dir"])
        .arg(ctx.catalog_root())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "demo: rule installed, 1 sub-rule(s) installed, 0 skipped",
        ));

    assert_eq!(ctx.read(".cursor/rules/demo.mdc"), "Demo rule for Shop\n");
    assert_eq!(ctx.read(".cursor/rules/demo/one.mdc"), "one\n");
}

#[test]
fn batch_continues_past_missing_rule_and_exits_nonzero() {
    let ctx = TestContext::new();
    seed_demo_catalog(&ctx);

    ctx.cli()
        .args(["add", "broken", "demo", "--agents-dir"])
        .arg(ctx.catalog_root())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("broken: Agent \"broken\" has no rule.mdc"))
        .stdout(predicate::str::contains(
            "demo: rule installed, 1 sub-rule(s) installed, 0 skipped",
        ));

    assert!(ctx.exists(".cursor/rules/demo.mdc"));
    assert!(!ctx.exists(".cursor/rules/broken.mdc"));
    assert!(!ctx.exists(".cursor/agents"));
}

#[test]
fn rerun_installs_newly_added_sub_rules_only() {
    let ctx = TestContext::new();
    seed_demo_catalog(&ctx);
    ctx.cli().args(["add", "demo", "--agents-dir"]).arg(ctx.catalog_root()).assert().success();

    ctx.write_catalog_file("demo/rules/two.mdc", "two\n");

    ctx.cli()
        .args(["add", "demo", "--agents-dir"])
        .arg(ctx.catalog_root())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "demo: rule skipped (exists), 1 sub-rule(s) installed, 1 skipped",
        ));

    assert_eq!(ctx.read(".cursor/rules/demo/two.mdc"), "two\n");
}
