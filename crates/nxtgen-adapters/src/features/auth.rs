//! Authentication with Auth.js (next-auth v5) or Clerk.

use nxtgen_core::{
    application::{Feature, FeatureContext},
    domain::{AuthProvider, ProjectConfig, ScaffoldPlan, WrapperComponent},
    error::NxtgenResult,
};

pub struct Auth;

impl Feature for Auth {
    fn name(&self) -> &'static str {
        "auth"
    }

    fn description(&self) -> &'static str {
        "Setting up authentication"
    }

    fn is_enabled(&self, config: &ProjectConfig) -> bool {
        config.auth.is_some()
    }

    fn register(&self, config: &ProjectConfig, plan: &mut ScaffoldPlan) {
        match config.auth {
            AuthProvider::NextAuth => plan.dependencies_mut().add_dep("next-auth@beta"),
            AuthProvider::Clerk => plan.dependencies_mut().add_dep("@clerk/nextjs"),
            AuthProvider::None => {}
        }
    }

    fn apply(&self, ctx: &mut FeatureContext<'_>) -> NxtgenResult<()> {
        match ctx.config().auth {
            AuthProvider::NextAuth => {
                ctx.write("src/auth.ts", NEXT_AUTH)?;
                ctx.write("src/app/api/auth/[...nextauth]/route.ts", NEXT_AUTH_ROUTE)?;
                ctx.write("src/middleware.ts", NEXT_AUTH_MIDDLEWARE)?;
            }
            AuthProvider::Clerk => {
                ctx.write("src/middleware.ts", CLERK_MIDDLEWARE)?;
                // The session provider for Auth.js is composed into Providers
                // instead; Clerk's sits directly in the layout.
                ctx.wrap_layout(&WrapperComponent::new("ClerkProvider", "@clerk/nextjs"))?;
            }
            AuthProvider::None => {}
        }
        Ok(())
    }
}

const NEXT_AUTH: &str = r#"import NextAuth from "next-auth";
import Credentials from "next-auth/providers/credentials";

export const { handlers, signIn, signOut, auth } = NextAuth({
  providers: [
    Credentials({
      credentials: {
        email: {},
        password: {},
      },
      authorize: async (credentials) => {
        // Look the user up and verify the password hash here.
        const user = null;

        if (!user) {
          throw new Error("Invalid credentials.");
        }

        return user;
      },
    }),
  ],
});
"#;

const NEXT_AUTH_ROUTE: &str = r#"import { handlers } from "@/auth";

export const { GET, POST } = handlers;
"#;

const NEXT_AUTH_MIDDLEWARE: &str = r#"export { auth as middleware } from "@/auth";
"#;

const CLERK_MIDDLEWARE: &str = r#"import { clerkMiddleware } from "@clerk/nextjs/server";

export default clerkMiddleware();

export const config = {
  matcher: [
    // Skip Next.js internals and all static files, unless found in search params
    "/((?!_next|[^?]*\\.(?:html?|css|js(?!on)|jpe?g|webp|png|gif|svg|ttf|woff2?|ico|csv|docx?|xlsx?|zip|webmanifest)).*)",
    // Always run for API routes
    "/(api|trpc)(.*)",
  ],
};
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::test_support::*;

    fn with(auth: AuthProvider) -> ProjectConfig {
        ProjectConfig {
            auth,
            ..ProjectConfig::default()
        }
    }

    #[test]
    fn clerk_wraps_layout() {
        let fs = generated();
        apply(&Auth, &with(AuthProvider::Clerk), &fs).unwrap();

        let layout = read(&fs, "src/app/layout.tsx");
        assert!(layout.contains("<ClerkProvider>{children}</ClerkProvider>"));
        assert!(layout.contains("import { ClerkProvider } from \"@clerk/nextjs\";"));
        assert!(read(&fs, "src/middleware.ts").contains("clerkMiddleware()"));
    }

    #[test]
    fn next_auth_writes_route_and_leaves_layout() {
        let fs = generated();
        let log = apply(&Auth, &with(AuthProvider::NextAuth), &fs).unwrap();

        assert!(read(&fs, "src/app/api/auth/[...nextauth]/route.ts").contains("handlers"));
        assert_eq!(read(&fs, "src/app/layout.tsx"), LAYOUT);
        assert!(log.mutations.is_empty());
        assert_eq!(
            register(&Auth, &with(AuthProvider::NextAuth))
                .dependencies()
                .deps(),
            ["next-auth@beta"]
        );
    }
}
