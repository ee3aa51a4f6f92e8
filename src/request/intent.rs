use http::Method;
use std::fmt;

/// The classified combination of HTTP method and URL pattern.
///
/// The URL "level" counts the addressed segments:
///
/// | Level | Pattern |
/// |-------|---------|
/// | 1 | `/<type>` |
/// | 2 | `/<type>/<id>` |
/// | 3 | `/<type>/<id>/<related>` |
/// | 4 | `/<type>/<id>/relationships/<name>` |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Intent {
    /// `GET /posts`
    #[default]
    ListResources,
    /// `GET /posts/1`
    FindResource,
    /// `POST /posts`
    CreateResource,
    /// `PATCH /posts/1`
    UpdateResource,
    /// `DELETE /posts/1`
    DeleteResource,
    /// `GET /posts/1/author`
    GetRelatedResources,
    /// `GET /posts/1/relationships/author`
    GetRelationship,
    /// `PATCH /posts/1/relationships/author`
    SetRelationship,
    /// `POST /posts/1/relationships/comments`
    AppendToRelationship,
    /// `DELETE /posts/1/relationships/comments`
    RemoveFromRelationship,
    /// A registered action on the collection, `/posts/<action>`.
    CollectionAction,
    /// A registered action on a single resource, `/posts/1/<action>`.
    ResourceAction,
}

impl Intent {
    /// Look up the intent for a method at a URL level.
    ///
    /// Returns `None` for combinations the protocol does not define, such as
    /// `PATCH /posts` or `DELETE /posts/1/author`. Actions are never returned.
    #[must_use]
    pub fn from_route(method: &Method, level: u8) -> Option<Intent> {
        let intent = match (method.as_str(), level) {
            ("GET", 1) => Intent::ListResources,
            ("GET", 2) => Intent::FindResource,
            ("GET", 3) => Intent::GetRelatedResources,
            ("GET", 4) => Intent::GetRelationship,
            ("POST", 1) => Intent::CreateResource,
            ("POST", 4) => Intent::AppendToRelationship,
            ("PATCH", 2) => Intent::UpdateResource,
            ("PATCH", 4) => Intent::SetRelationship,
            ("DELETE", 2) => Intent::DeleteResource,
            ("DELETE", 4) => Intent::RemoveFromRelationship,
            _ => return None,
        };
        Some(intent)
    }

    /// URL level of this intent, `None` for actions.
    #[must_use]
    pub fn level(self) -> Option<u8> {
        match self {
            Intent::ListResources | Intent::CreateResource => Some(1),
            Intent::FindResource | Intent::UpdateResource | Intent::DeleteResource => Some(2),
            Intent::GetRelatedResources => Some(3),
            Intent::GetRelationship
            | Intent::SetRelationship
            | Intent::AppendToRelationship
            | Intent::RemoveFromRelationship => Some(4),
            Intent::CollectionAction | Intent::ResourceAction => None,
        }
    }

    /// `true` when requests of this intent carry a document body.
    #[must_use]
    pub fn document_expected(self) -> bool {
        matches!(
            self,
            Intent::CreateResource
                | Intent::UpdateResource
                | Intent::SetRelationship
                | Intent::AppendToRelationship
                | Intent::RemoveFromRelationship
        )
    }

    /// The HTTP method a client uses for this intent.
    ///
    /// Actions accept a configurable set of methods, so they have none.
    #[must_use]
    pub fn request_method(self) -> Option<Method> {
        match self {
            Intent::ListResources
            | Intent::FindResource
            | Intent::GetRelatedResources
            | Intent::GetRelationship => Some(Method::GET),
            Intent::CreateResource | Intent::AppendToRelationship => Some(Method::POST),
            Intent::UpdateResource | Intent::SetRelationship => Some(Method::PATCH),
            Intent::DeleteResource | Intent::RemoveFromRelationship => Some(Method::DELETE),
            Intent::CollectionAction | Intent::ResourceAction => None,
        }
    }

    #[must_use]
    pub fn is_action(self) -> bool {
        matches!(self, Intent::CollectionAction | Intent::ResourceAction)
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Intent::ListResources => "ListResources",
            Intent::FindResource => "FindResource",
            Intent::CreateResource => "CreateResource",
            Intent::UpdateResource => "UpdateResource",
            Intent::DeleteResource => "DeleteResource",
            Intent::GetRelatedResources => "GetRelatedResources",
            Intent::GetRelationship => "GetRelationship",
            Intent::SetRelationship => "SetRelationship",
            Intent::AppendToRelationship => "AppendToRelationship",
            Intent::RemoveFromRelationship => "RemoveFromRelationship",
            Intent::CollectionAction => "CollectionAction",
            Intent::ResourceAction => "ResourceAction",
        };
        write!(f, "{}", s)
    }
}
