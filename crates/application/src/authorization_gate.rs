use std::future::Future;

use teamgate_core::{AppError, AppResult, Credential, TeamId};
use teamgate_domain::{AccessRequirement, Permission, Role};

use crate::{AuthorizationContext, AuthorizationContextResolver};

/// Inbound operation descriptor the gate can authorize.
pub trait ProtectedRequest {
    /// Team the operation is scoped to. `None` is a malformed call.
    fn team_id(&self) -> Option<TeamId>;

    /// Credential presented by the caller.
    fn credential(&self) -> Option<&Credential>;
}

/// Single enforcement point in front of every protected operation.
///
/// Decisions depend only on the actor, the team and the backing store state
/// at call time. The gate itself performs no writes.
#[derive(Clone)]
pub struct AuthorizationGate {
    resolver: AuthorizationContextResolver,
}

impl AuthorizationGate {
    /// Creates a gate over a context resolver.
    #[must_use]
    pub fn new(resolver: AuthorizationContextResolver) -> Self {
        Self { resolver }
    }

    /// Resolves the context and checks the requirement without running anything.
    pub async fn authorize<R>(
        &self,
        request: &R,
        requirement: &AccessRequirement,
    ) -> AppResult<AuthorizationContext>
    where
        R: ProtectedRequest,
    {
        let team_id = request
            .team_id()
            .ok_or_else(|| AppError::Validation("team id is required".to_owned()))?;

        let context = self.resolver.resolve(request.credential(), team_id).await?;

        if !requirement.is_satisfied_by(context.effective_role()) {
            let label = match requirement {
                AccessRequirement::Roles(_) => "insufficient role permissions",
                _ => "insufficient permissions",
            };
            return Err(AppError::InsufficientPermissions(format!(
                "{label}: role '{}' does not satisfy {} in team '{team_id}'",
                context.effective_role(),
                requirement.describe()
            )));
        }

        Ok(context)
    }

    /// Authorizes the request and, only if allowed, runs `operation` once.
    ///
    /// The operation's result is returned unchanged. On any denial the
    /// operation is dropped without being called.
    pub async fn run<R, T, F, Fut>(
        &self,
        request: R,
        requirement: &AccessRequirement,
        operation: F,
    ) -> AppResult<T>
    where
        R: ProtectedRequest,
        F: FnOnce(R, AuthorizationContext) -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        let context = self.authorize(&request, requirement).await?;
        operation(request, context).await
    }

    /// Runs `operation` when the actor holds `permission`.
    pub async fn with_permission<R, T, F, Fut>(
        &self,
        request: R,
        permission: Permission,
        operation: F,
    ) -> AppResult<T>
    where
        R: ProtectedRequest,
        F: FnOnce(R, AuthorizationContext) -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        self.run(request, &AccessRequirement::Permission(permission), operation)
            .await
    }

    /// Runs `operation` when the actor holds at least one of `permissions`.
    pub async fn with_any_permission<R, T, F, Fut>(
        &self,
        request: R,
        permissions: &[Permission],
        operation: F,
    ) -> AppResult<T>
    where
        R: ProtectedRequest,
        F: FnOnce(R, AuthorizationContext) -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        self.run(
            request,
            &AccessRequirement::AnyPermission(permissions.to_vec()),
            operation,
        )
        .await
    }

    /// Runs `operation` when the effective role is literally one of `roles`.
    pub async fn with_roles<R, T, F, Fut>(
        &self,
        request: R,
        roles: &[Role],
        operation: F,
    ) -> AppResult<T>
    where
        R: ProtectedRequest,
        F: FnOnce(R, AuthorizationContext) -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        self.run(request, &AccessRequirement::Roles(roles.to_vec()), operation)
            .await
    }

    /// Wraps a handler so that every call goes through this gate first.
    #[must_use]
    pub fn protect<H>(&self, requirement: AccessRequirement, handler: H) -> ProtectedOperation<H> {
        ProtectedOperation {
            gate: self.clone(),
            requirement,
            handler,
        }
    }
}

/// Handler wrapped by [`AuthorizationGate::protect`].
#[derive(Clone)]
pub struct ProtectedOperation<H> {
    gate: AuthorizationGate,
    requirement: AccessRequirement,
    handler: H,
}

impl<H> ProtectedOperation<H> {
    /// Returns the declared requirement.
    #[must_use]
    pub fn requirement(&self) -> &AccessRequirement {
        &self.requirement
    }

    /// Calls the wrapped handler behind the gate.
    pub async fn call<R, T, Fut>(&self, request: R) -> AppResult<T>
    where
        R: ProtectedRequest,
        H: Fn(R, AuthorizationContext) -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        self.gate
            .run(request, &self.requirement, |request, context| {
                (self.handler)(request, context)
            })
            .await
    }
}
