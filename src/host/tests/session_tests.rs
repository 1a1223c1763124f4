//! Tests for active-document tracking in [`HostSession`].

use crate::host::{
    adapters::{InMemoryDocument, InMemoryHost},
    domain::{DocumentName, HostError},
    session::HostSession,
};
use rstest::{fixture, rstest};

#[fixture]
fn host() -> InMemoryHost {
    let host = InMemoryHost::new();
    host.add_document(InMemoryDocument::new("site.gh").expect("valid document"))
        .expect("document added");
    host.add_document(InMemoryDocument::new("massing.gh").expect("valid document"))
        .expect("document added");
    host
}

fn name(raw: &str) -> DocumentName {
    DocumentName::new(raw).expect("valid document name")
}

#[rstest]
fn session_without_open_documents_has_no_active_document(host: InMemoryHost) {
    let session = HostSession::new(Box::new(host));
    assert_eq!(session.active_document(), None);
    assert_eq!(
        session.resolve_document(None),
        Err(HostError::NoActiveDocument)
    );
}

#[rstest]
fn activate_opens_and_selects_document(host: InMemoryHost) {
    let mut session = HostSession::new(Box::new(host));
    session.activate(&name("massing.gh")).expect("activation succeeds");

    assert_eq!(session.active_document(), Some(&name("massing.gh")));
    assert_eq!(session.resolve_document(None), Ok(name("massing.gh")));
}

#[rstest]
fn named_document_must_be_open(host: InMemoryHost) {
    let mut session = HostSession::new(Box::new(host));
    session.activate(&name("site.gh")).expect("activation succeeds");

    assert_eq!(
        session.resolve_document(Some("massing.gh")),
        Err(HostError::DocumentNotOpen(name("massing.gh")))
    );
    assert_eq!(session.resolve_document(Some("site.gh")), Ok(name("site.gh")));
}

#[rstest]
fn first_open_document_becomes_active(host: InMemoryHost) {
    let mut shared = host.clone();
    crate::host::ports::ModelHost::open_document(&mut shared, &name("site.gh"))
        .expect("document opened");

    let session = HostSession::new(Box::new(host));
    assert_eq!(session.active_document(), Some(&name("site.gh")));
}
