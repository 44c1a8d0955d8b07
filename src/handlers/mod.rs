// Two security tiers: public (no auth) and protected (session cookie
// required, enforced by crate::middleware::require_auth at the router).
pub mod protected;
pub mod public;
