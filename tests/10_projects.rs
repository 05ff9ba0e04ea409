mod common;

use std::fs;

use common::{entries, expected_manifest, Fixture};
use ondemand_projects::project::{Field, ProjectAttributes, ProjectError};

#[test]
fn create_with_empty_attributes_fails_on_name_only() {
    let fx = Fixture::new();

    let err = fx.store.create(ProjectAttributes::new()).unwrap_err();
    let errors = err.field_errors().expect("validation error");

    assert_eq!(errors.len(), 1);
    assert!(errors.contains(Field::Name));
    assert!(!fx.store.projects_root().exists());
}

#[test]
fn create_reports_one_error_per_invalid_field() {
    let fx = Fixture::new();

    for directory in [fx.path().to_path_buf(), fx.store.projects_root()] {
        let attrs = ProjectAttributes::new()
            .name("test")
            .icon("invalid_format")
            .directory(&directory)
            .template("/invalid/template");
        let err = fx.store.create(attrs).unwrap_err();
        let errors = err.field_errors().expect("validation error");

        assert_eq!(errors.len(), 3, "directory {}", directory.display());
        assert!(errors.contains(Field::Icon));
        assert!(errors.contains(Field::Directory));
        assert!(errors.contains(Field::Template));
        assert!(entries(fx.path()).is_empty());
    }
}

#[test]
fn directory_that_is_a_file_is_invalid_and_untouched() {
    let fx = Fixture::new();
    let file = fx.path().join("occupied");
    fs::write(&file, "data").unwrap();

    let err = fx
        .store
        .create(ProjectAttributes::new().name("test").directory(&file))
        .unwrap_err();
    let errors = err.field_errors().expect("validation error");

    assert_eq!(errors.len(), 1);
    assert!(errors.contains(Field::Directory));
    assert_eq!(fs::read_to_string(&file).unwrap(), "data");
}

#[test]
fn creates_project() {
    let fx = Fixture::new();
    let project = fx.create_project(None, None);

    assert!(!project.id().is_empty());
    assert!(entries(&fx.path().join("projects")).contains(&project.id().to_string()));
}

#[test]
fn creates_project_with_directory_override() {
    let fx = Fixture::new();
    let project_dir = fx.path().join("dir_override");
    let project = fx.create_project(Some(project_dir.clone()), None);

    assert_eq!(project.directory(), project_dir.as_path());
    assert!(project_dir.is_dir());
    assert!(project_dir.join(".ondemand/manifest.yml").is_file());
    assert!(!fx.path().join("projects").join(project.id()).exists());
}

#[test]
fn creates_project_with_template_copies_template_files() {
    let fx = Fixture::new();
    let template_dir = fx.path().join("template");
    let file_content = "some multiline content\necho 'multiline content'\ndescription: multiline content\n";
    fs::create_dir_all(&template_dir).unwrap();
    for name in ["script.sh", "info.txt", "config.yml"] {
        fs::write(template_dir.join(name), file_content).unwrap();
    }

    let project = fx.create_project(None, Some(template_dir.clone()));

    let listing = entries(project.directory());
    for name in ["script.sh", "info.txt", "config.yml"] {
        assert!(listing.contains(&name.to_string()), "{name} missing from {listing:?}");
        assert_eq!(fs::read_to_string(project.directory().join(name)).unwrap(), file_content);
    }
    // the template itself is left alone
    assert_eq!(entries(&template_dir), vec!["config.yml", "info.txt", "script.sh"]);
}

#[test]
fn creates_ondemand_configuration_directory() {
    let fx = Fixture::new();
    let project = fx.create_project(None, None);

    assert!(entries(project.directory()).contains(&".ondemand".to_string()));
}

#[test]
fn creates_manifest_in_configuration_directory() {
    let fx = Fixture::new();
    let project = fx.create_project(None, None);

    assert_eq!(project.directory(), fx.path().join("projects").join(project.id()));

    let manifest_path = fx
        .path()
        .join("projects")
        .join(project.id())
        .join(".ondemand/manifest.yml");
    assert!(manifest_path.is_file());
    assert_eq!(
        fs::read_to_string(&manifest_path).unwrap(),
        expected_manifest(project.id(), "test-project", "description", "fas://arrow-right")
    );
}

#[test]
fn destroy_removes_identity_but_keeps_directory() {
    let fx = Fixture::new();
    let project = fx.create_project(None, None);
    let projects = fx.path().join("projects");
    fs::write(project.directory().join("results.csv"), "1,2,3\n").unwrap();

    assert!(entries(&projects).contains(&project.id().to_string()));
    assert!(entries(project.directory()).contains(&".ondemand".to_string()));

    fx.store.destroy(&project).unwrap();

    assert!(entries(&projects).contains(&project.id().to_string()));
    assert_eq!(entries(project.directory()), vec!["results.csv"]);
}

#[test]
fn update_rewrites_manifest() {
    let fx = Fixture::new();
    let mut project = fx.create_project(None, None);

    let attrs = ProjectAttributes::new()
        .name("test-project-2")
        .description("my test project")
        .icon("fas://arrow-left");
    fx.store.update(&mut project, attrs).unwrap();

    assert!(project.manifest_path().exists());
    assert_eq!(
        fs::read_to_string(project.manifest_path()).unwrap(),
        expected_manifest(project.id(), "test-project-2", "my test project", "fas://arrow-left")
    );
}

#[test]
fn update_only_changes_name_icon_and_description() {
    let fx = Fixture::new();
    let mut project = fx.create_project(None, None);
    let old_id = project.id().to_string();
    let old_directory = project.directory().to_path_buf();

    let attrs = ProjectAttributes::new()
        .id("updated")
        .name("updated")
        .icon("fas://updated")
        .directory("/updated")
        .description("updated")
        .template("/some/path");
    fx.store.update(&mut project, attrs).unwrap();

    assert_eq!(project.name(), "updated");
    assert_eq!(project.icon(), "fas://updated");
    assert_eq!(project.description(), "updated");
    assert_eq!(project.id(), old_id);
    assert_eq!(project.directory(), old_directory.as_path());

    let manifest = fs::read_to_string(project.manifest_path()).unwrap();
    assert_eq!(manifest, expected_manifest(&old_id, "updated", "updated", "fas://updated"));
    assert!(!manifest.contains("template"));
    assert!(!manifest.contains("directory"));
    assert!(!std::path::Path::new("/updated").exists());

    let reloaded = fx.store.find(&old_id).unwrap();
    assert_eq!(reloaded, project);
}

#[test]
fn update_validation_leaves_manifest_unchanged() {
    let fx = Fixture::new();
    let mut project = fx.create_project(None, None);
    let before = fs::read_to_string(project.manifest_path()).unwrap();

    let err = fx
        .store
        .update(&mut project, ProjectAttributes::new())
        .unwrap_err();
    let errors = err.field_errors().expect("validation error");

    assert_eq!(errors.len(), 2);
    assert!(errors.contains(Field::Name));
    assert!(errors.contains(Field::Icon));
    assert_eq!(fs::read_to_string(project.manifest_path()).unwrap(), before);
    assert_eq!(project.name(), "test-project");
}

#[test]
fn update_rejects_malformed_icon() {
    let fx = Fixture::new();
    let mut project = fx.create_project(None, None);

    let err = fx
        .store
        .update(&mut project, ProjectAttributes::new().name("ok").icon("not an icon"))
        .unwrap_err();

    assert!(matches!(&err, ProjectError::Validation(errors) if errors.len() == 1 && errors.contains(Field::Icon)));
    assert_eq!(project.icon(), "fas://arrow-right");
}

#[test]
fn reading_a_destroyed_project_is_not_found() {
    let fx = Fixture::new();
    let project = fx.create_project(Some(fx.path().join("override")), None);

    fx.store.destroy(&project).unwrap();

    assert!(matches!(fx.store.find(project.id()), Err(ProjectError::NotFound(_))));
    assert!(fx.path().join("override").is_dir());
    assert!(fx.store.all().unwrap().is_empty());
}

#[test]
fn malformed_manifest_is_a_parse_error_not_missing() {
    let fx = Fixture::new();
    let project = fx.create_project(None, None);
    fs::write(project.manifest_path(), "---\nid: [broken\n").unwrap();

    let err = fx.store.find(project.id()).unwrap_err();
    assert!(matches!(err, ProjectError::Manifest(_)), "unexpected error: {err}");
}

#[test]
fn templates_outside_the_template_root_are_rejected() {
    use ondemand_projects::config::StorageConfig;
    use ondemand_projects::project::ProjectStore;

    let fx = Fixture::new();
    let allowed = fx.path().join("templates");
    let inside = allowed.join("starter");
    let outside = fx.path().join("rogue");
    fs::create_dir_all(&inside).unwrap();
    fs::create_dir_all(&outside).unwrap();
    fs::write(inside.join("README.md"), "starter\n").unwrap();

    let store = ProjectStore::new(StorageConfig::new(fx.path()).with_template_root(&allowed));

    let err = store
        .create(ProjectAttributes::new().name("p").template(&outside))
        .unwrap_err();
    assert!(err.field_errors().unwrap().contains(Field::Template));

    let project = store
        .create(ProjectAttributes::new().name("p").template(&inside))
        .unwrap();
    assert_eq!(fs::read_to_string(project.directory().join("README.md")).unwrap(), "starter\n");
}
