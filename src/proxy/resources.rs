// Resource catalogue
// Every upstream resource the gateway relays, described as data

use reqwest::Method;
use serde::{Deserialize, Serialize};

/// When the forwarder retries with the alternate credential candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetryPolicy {
    /// Single attempt.
    Never,
    /// Retry on `401`.
    OnUnauthorized,
    /// Retry on any non-2xx, `401` included. Some upstream endpoints answer a
    /// rejected credential format with a generic failure.
    OnAnyFailure,
}

impl RetryPolicy {
    pub fn should_retry(self, status: u16) -> bool {
        match self {
            RetryPolicy::Never => false,
            RetryPolicy::OnUnauthorized => status == 401,
            RetryPolicy::OnAnyFailure => !(200..300).contains(&status),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyRule {
    /// Not forwarded even if sent.
    Ignored,
    /// Forwarded when present, must be JSON.
    Optional,
    /// Must be present and JSON.
    Required,
}

/// A path parameter the resource cannot be addressed without.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathParam {
    pub name: &'static str,
    /// Human name used in the `"<label> is required"` message.
    pub label: &'static str,
}

const CLUB_ID: PathParam = PathParam {
    name: "id",
    label: "Club ID",
};

const EVENT_ID: PathParam = PathParam {
    name: "id",
    label: "Event ID",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    Sports,
    Tiers,
    Amenities,
    Facilities,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Login,
    Logout,
    CurrentUser,
    CreateClub,
    ListMyClubs,
    UpdateClub,
    ListClubMembers,
    CreateEvent,
    ListEvents,
    UpdateEvent,
    DeleteEvent,
    PostponeEvent,
    ListEventRegistrations,
    Catalog(CatalogKind),
}

/// Static description of how one resource is forwarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    pub method: Method,
    /// Upstream path template, relative to the configured origin.
    pub upstream_path: &'static str,
    pub requires_auth: bool,
    pub body: BodyRule,
    pub path_param: Option<PathParam>,
    pub retry: RetryPolicy,
    /// Send `X-Requested-With: XMLHttpRequest`.
    pub ajax: bool,
}

impl Resource {
    pub const ALL: [Resource; 17] = [
        Resource::Login,
        Resource::Logout,
        Resource::CurrentUser,
        Resource::CreateClub,
        Resource::ListMyClubs,
        Resource::UpdateClub,
        Resource::ListClubMembers,
        Resource::CreateEvent,
        Resource::ListEvents,
        Resource::UpdateEvent,
        Resource::DeleteEvent,
        Resource::PostponeEvent,
        Resource::ListEventRegistrations,
        Resource::Catalog(CatalogKind::Sports),
        Resource::Catalog(CatalogKind::Tiers),
        Resource::Catalog(CatalogKind::Amenities),
        Resource::Catalog(CatalogKind::Facilities),
    ];

    /// Stable name used in logs and in `credential_fallback.overrides`.
    pub fn name(&self) -> &'static str {
        match self {
            Resource::Login => "login",
            Resource::Logout => "logout",
            Resource::CurrentUser => "current_user",
            Resource::CreateClub => "create_club",
            Resource::ListMyClubs => "list_my_clubs",
            Resource::UpdateClub => "update_club",
            Resource::ListClubMembers => "list_club_members",
            Resource::CreateEvent => "create_event",
            Resource::ListEvents => "list_events",
            Resource::UpdateEvent => "update_event",
            Resource::DeleteEvent => "delete_event",
            Resource::PostponeEvent => "postpone_event",
            Resource::ListEventRegistrations => "list_event_registrations",
            Resource::Catalog(CatalogKind::Sports) => "sports",
            Resource::Catalog(CatalogKind::Tiers) => "tiers",
            Resource::Catalog(CatalogKind::Amenities) => "amenities",
            Resource::Catalog(CatalogKind::Facilities) => "facilities",
        }
    }

    pub fn descriptor(&self) -> ResourceDescriptor {
        use BodyRule::*;
        use RetryPolicy::*;

        match self {
            Resource::Login => ResourceDescriptor {
                method: Method::POST,
                upstream_path: "/auth/login",
                requires_auth: false,
                body: Required,
                path_param: None,
                retry: Never,
                ajax: true,
            },
            Resource::Logout => ResourceDescriptor {
                ajax: true,
                ..authed(Method::POST, "/auth/logout", Ignored, None, OnUnauthorized)
            },
            Resource::CurrentUser => ResourceDescriptor {
                ajax: true,
                ..authed(Method::GET, "/auth/me", Ignored, None, OnUnauthorized)
            },
            Resource::CreateClub => authed(Method::POST, "/clubs", Required, None, OnUnauthorized),
            Resource::ListMyClubs => {
                authed(Method::GET, "/clubs/my-clubs", Ignored, None, OnUnauthorized)
            }
            Resource::UpdateClub => authed(
                Method::PUT,
                "/clubs/{id}",
                Required,
                Some(CLUB_ID),
                OnUnauthorized,
            ),
            Resource::ListClubMembers => authed(
                Method::GET,
                "/clubs/{id}/members",
                Ignored,
                Some(CLUB_ID),
                OnAnyFailure,
            ),
            Resource::CreateEvent => authed(Method::POST, "/events", Required, None, OnUnauthorized),
            Resource::ListEvents => authed(Method::GET, "/events", Ignored, None, OnUnauthorized),
            Resource::UpdateEvent => authed(
                Method::PUT,
                "/events/{id}",
                Required,
                Some(EVENT_ID),
                OnAnyFailure,
            ),
            Resource::DeleteEvent => authed(
                Method::DELETE,
                "/events/{id}",
                Ignored,
                Some(EVENT_ID),
                OnAnyFailure,
            ),
            Resource::PostponeEvent => authed(
                Method::POST,
                "/events/{id}/postpone",
                Optional,
                Some(EVENT_ID),
                OnAnyFailure,
            ),
            Resource::ListEventRegistrations => authed(
                Method::GET,
                "/events/{id}/registrations",
                Ignored,
                Some(EVENT_ID),
                OnUnauthorized,
            ),
            Resource::Catalog(kind) => ResourceDescriptor {
                method: Method::GET,
                upstream_path: match kind {
                    CatalogKind::Sports => "/sports",
                    CatalogKind::Tiers => "/tiers",
                    CatalogKind::Amenities => "/amenities",
                    CatalogKind::Facilities => "/facilities",
                },
                requires_auth: false,
                body: Ignored,
                path_param: None,
                retry: Never,
                ajax: false,
            },
        }
    }
}

fn authed(
    method: Method,
    upstream_path: &'static str,
    body: BodyRule,
    path_param: Option<PathParam>,
    retry: RetryPolicy,
) -> ResourceDescriptor {
    ResourceDescriptor {
        method,
        upstream_path,
        requires_auth: true,
        body,
        path_param,
        retry,
        ajax: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_retry_predicates() {
        assert!(!RetryPolicy::Never.should_retry(401));
        assert!(RetryPolicy::OnUnauthorized.should_retry(401));
        assert!(!RetryPolicy::OnUnauthorized.should_retry(403));
        assert!(!RetryPolicy::OnUnauthorized.should_retry(500));
        assert!(RetryPolicy::OnAnyFailure.should_retry(401));
        assert!(RetryPolicy::OnAnyFailure.should_retry(500));
        assert!(!RetryPolicy::OnAnyFailure.should_retry(204));
    }

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = Resource::ALL.iter().map(|r| r.name()).collect();
        assert_eq!(names.len(), Resource::ALL.len());
    }

    #[test]
    fn test_unauthenticated_resources_never_retry() {
        for resource in Resource::ALL {
            let d = resource.descriptor();
            if !d.requires_auth {
                assert_eq!(d.retry, RetryPolicy::Never, "{}", resource.name());
            }
        }
    }

    #[test]
    fn test_templates_match_path_params() {
        for resource in Resource::ALL {
            let d = resource.descriptor();
            let has_placeholder = d.upstream_path.contains("{id}");
            assert_eq!(has_placeholder, d.path_param.is_some(), "{}", resource.name());
        }
    }

    #[test]
    fn test_write_methods_carry_bodies() {
        assert_eq!(Resource::UpdateClub.descriptor().method, Method::PUT);
        assert_eq!(Resource::UpdateClub.descriptor().body, BodyRule::Required);
        assert_eq!(Resource::DeleteEvent.descriptor().body, BodyRule::Ignored);
        assert_eq!(Resource::PostponeEvent.descriptor().body, BodyRule::Optional);
    }
}
