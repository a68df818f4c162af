use versionup::param::{GitSourceDefinition, ParameterSet};
use versionup::props::{PropertyBlock, REDACTED, SensitiveVars, keys};
use versionup::step::CommitLogRequest;

#[test]
fn fixed_parameter_set_serializes_exactly() {
    let params = ParameterSet::new()
        .with("url", "git://h/a")
        .with("port", "29418")
        .with("path", "proj")
        .with("branch", "master");

    let block = PropertyBlock::new()
        .with(keys::GIT_SERVER_URL, params.get_or_empty("url"))
        .with(keys::GIT_SERVER_PORT, params.get_or_empty("port"))
        .with(keys::GIT_PROJECT_NAME, params.get_or_empty("path"))
        .with(keys::GIT_BRANCH_NAME, params.get_or_empty("branch"));

    assert_eq!(
        block.serialize(),
        "GIT_SERVER_URL=git://h/a\nGIT_SERVER_PORT=29418\nGIT_PROJECT_NAME=proj\nGIT_BRANCH_NAME=master\n"
    );
}

#[test]
fn multi_value_fields_yield_aligned_pairs() {
    let params = ParameterSet::new()
        .with("gitUrl", "u1\nu2")
        .with("gitPort", "p1\np2");
    let def = GitSourceDefinition::from_parameters("GIT_SOURCE", &params);

    let pairs: Vec<(String, String)> = def
        .repositories()
        .into_iter()
        .map(|r| (r.url, r.port))
        .collect();

    assert_eq!(
        pairs,
        vec![
            ("u1".to_string(), "p1".to_string()),
            ("u2".to_string(), "p2".to_string()),
        ]
    );
}

#[test]
fn selected_repository_feeds_commit_log_block() {
    let def = GitSourceDefinition::new("SRC", "u1\nu2", "p1\np2", "a\nb", "m\nt");
    let value = def.select(1).expect("second repository");
    let request = CommitLogRequest::new(value.repository, "/ws");

    assert_eq!(
        request.properties().serialize(),
        "GIT_SERVER_URL=u2\nGIT_SERVER_PORT=p2\nGIT_PROJECT_NAME=b\nGIT_BRANCH_NAME=t\nWORKSPACE=/ws\n"
    );
}

#[test]
fn redacted_rendering_hides_every_sensitive_value() {
    let block = PropertyBlock::new()
        .with("USER", "bob")
        .with("PASSWORD", "hunter2")
        .with("TOKEN", "abc");
    let sensitive: SensitiveVars = ["PASSWORD", "TOKEN"].into_iter().collect();

    let shown = block.render_redacted(&sensitive);
    assert_eq!(shown, format!("USER=bob\nPASSWORD={REDACTED}\nTOKEN={REDACTED}\n"));
    assert!(block.serialize().contains("PASSWORD=hunter2"));
}
