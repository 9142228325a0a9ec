//! Example pages: a posts CRUD (API routes plus client page) and an auth page.
//!
//! The API routes speak to whichever data layer was written earlier, and
//! the page fetches through React Query and Axios when they are selected.

use nxtgen_core::{
    application::{Feature, FeatureContext},
    domain::{AuthProvider, Orm, ProjectConfig},
    error::NxtgenResult,
};

pub struct Examples;

impl Feature for Examples {
    fn name(&self) -> &'static str {
        "examples"
    }

    fn description(&self) -> &'static str {
        "Generating example pages"
    }

    fn is_enabled(&self, config: &ProjectConfig) -> bool {
        config.examples.includes_crud() || config.examples.includes_auth()
    }

    fn apply(&self, ctx: &mut FeatureContext<'_>) -> NxtgenResult<()> {
        let config = ctx.config();
        let crud = config.examples.includes_crud();
        let auth = config.examples.includes_auth() && config.auth.is_some();

        if crud {
            ctx.write("src/app/api/posts/route.ts", &collection_route(config.orm))?;
            ctx.write("src/app/api/posts/[id]/route.ts", &item_route(config.orm))?;
            ctx.write(
                "src/app/posts/page.tsx",
                &posts_page(config.react_query, config.axios),
            )?;
        }
        if auth {
            ctx.write("src/app/auth/page.tsx", auth_page(config.auth))?;
        } else if config.examples.includes_auth() {
            ctx.warn("auth examples need an auth provider; skipped the auth page");
        }
        if crud && auth {
            ctx.write("src/app/page.tsx", HUB_PAGE)?;
        }
        Ok(())
    }
}

// ── API routes ───────────────────────────────────────────────────────────────

fn collection_route(orm: Orm) -> String {
    let (imports, list, create, created) = match orm {
        Orm::Prisma => (
            "import prisma from '@/lib/prisma';",
            r#"  const posts = await prisma.post.findMany({
    where: search
      ? { OR: [{ title: { contains: search } }, { content: { contains: search } }] }
      : {},
    orderBy: { createdAt: 'desc' },
  });"#,
            "  const post = await prisma.post.create({ data: { title: body.title, content: body.content } });",
            "post",
        ),
        Orm::Drizzle => (
            "import { db } from '@/lib/db';\nimport { posts as table } from '@/db/schema';\nimport { desc, like, or } from 'drizzle-orm';",
            r#"  const posts = await db
    .select()
    .from(table)
    .where(search ? or(like(table.title, `%${search}%`), like(table.content, `%${search}%`)) : undefined)
    .orderBy(desc(table.createdAt));"#,
            "  const post = await db.insert(table).values({ title: body.title, content: body.content }).returning();",
            "post[0]",
        ),
        Orm::None => (
            "import { db } from '@/lib/db';",
            r#"  const posts = await db.post.findMany({
    where: search
      ? { OR: [{ title: { contains: search } }, { content: { contains: search } }] }
      : undefined,
    orderBy: { createdAt: 'desc' },
  });"#,
            "  const post = await db.post.create({ data: { title: body.title, content: body.content } });",
            "post",
        ),
    };

    format!(
        r#"import {{ NextResponse }} from 'next/server';
{imports}

export async function GET(request: Request) {{
  const search = new URL(request.url).searchParams.get('search');
{list}
  return NextResponse.json(posts);
}}

export async function POST(request: Request) {{
  const body = await request.json();
{create}
  return NextResponse.json({created}, {{ status: 201 }});
}}
"#
    )
}

fn item_route(orm: Orm) -> String {
    let (imports, update, updated, delete) = match orm {
        Orm::Prisma => (
            "import prisma from '@/lib/prisma';",
            "    const post = await prisma.post.update({\n      where: { id },\n      data: { title: body.title, content: body.content },\n    });",
            "post",
            "    await prisma.post.delete({ where: { id } });",
        ),
        Orm::Drizzle => (
            "import { db } from '@/lib/db';\nimport { posts } from '@/db/schema';\nimport { eq } from 'drizzle-orm';",
            "    const post = await db\n      .update(posts)\n      .set({ title: body.title, content: body.content })\n      .where(eq(posts.id, id))\n      .returning();",
            "post[0]",
            "    await db.delete(posts).where(eq(posts.id, id));",
        ),
        Orm::None => (
            "import { db } from '@/lib/db';",
            "    const post = await db.post.update({\n      where: { id },\n      data: { title: body.title, content: body.content },\n    });",
            "post",
            "    await db.post.delete({ where: { id } });",
        ),
    };

    format!(
        r#"import {{ NextResponse }} from 'next/server';
{imports}

type Params = {{ params: Promise<{{ id: string }}> }};

export async function PUT(request: Request, {{ params }}: Params) {{
  const id = Number((await params).id);
  const body = await request.json();

  try {{
{update}
    return NextResponse.json({updated});
  }} catch {{
    return NextResponse.json({{ error: 'Post not found or update failed' }}, {{ status: 500 }});
  }}
}}

export async function DELETE(_request: Request, {{ params }}: Params) {{
  const id = Number((await params).id);

  try {{
{delete}
    return NextResponse.json({{ message: 'Post deleted' }});
  }} catch {{
    return NextResponse.json({{ error: 'Post not found or delete failed' }}, {{ status: 500 }});
  }}
}}
"#
    )
}

// ── Posts page ───────────────────────────────────────────────────────────────

fn posts_page(react_query: bool, axios: bool) -> String {
    let mut imports = String::from("import { useEffect, useState } from \"react\";\n");
    if react_query {
        imports.push_str(
            "import { useMutation, useQuery, useQueryClient } from \"@tanstack/react-query\";\n",
        );
    }
    if axios {
        imports.push_str("import { api } from \"@/lib/axios\";\n");
    }
    let client = if axios { AXIOS_CLIENT } else { FETCH_CLIENT };
    let hook = if react_query { QUERY_HOOK } else { STATE_HOOK };

    format!("\"use client\";\n\n{imports}{POST_TYPES}{client}{hook}{POSTS_VIEW}")
}

const POST_TYPES: &str = r#"
interface Post {
  id: number;
  title: string;
  content: string | null;
  createdAt: string;
}

type Draft = { title: string; content: string };
"#;

const AXIOS_CLIENT: &str = r#"
const client = {
  list: (search: string) => api.get<Post[]>("/posts", { params: { search } }).then((res) => res.data),
  create: (draft: Draft) => api.post("/posts", draft),
  update: (post: Post) => api.put(`/posts/${post.id}`, post),
  remove: (id: number) => api.delete(`/posts/${id}`),
};
"#;

const FETCH_CLIENT: &str = r#"
const json = { "Content-Type": "application/json" };

const client = {
  list: (search: string) =>
    fetch(`/api/posts?search=${encodeURIComponent(search)}`).then((res) => res.json() as Promise<Post[]>),
  create: (draft: Draft) =>
    fetch("/api/posts", { method: "POST", headers: json, body: JSON.stringify(draft) }),
  update: (post: Post) =>
    fetch(`/api/posts/${post.id}`, { method: "PUT", headers: json, body: JSON.stringify(post) }),
  remove: (id: number) => fetch(`/api/posts/${id}`, { method: "DELETE" }),
};
"#;

const QUERY_HOOK: &str = r#"
function usePosts(search: string) {
  const queryClient = useQueryClient();
  const { data: posts = [], isLoading } = useQuery({
    queryKey: ["posts", search],
    queryFn: () => client.list(search),
  });
  const refresh = () => queryClient.invalidateQueries({ queryKey: ["posts"] });

  const save = useMutation({
    mutationFn: (post: Draft | Post) => ("id" in post ? client.update(post) : client.create(post)),
    onSuccess: refresh,
  });
  const remove = useMutation({ mutationFn: client.remove, onSuccess: refresh });

  return { posts, isLoading, save: save.mutate, remove: remove.mutate };
}
"#;

const STATE_HOOK: &str = r#"
function usePosts(search: string) {
  const [posts, setPosts] = useState<Post[]>([]);
  const [isLoading, setIsLoading] = useState(true);
  const [version, setVersion] = useState(0);

  useEffect(() => {
    let cancelled = false;
    setIsLoading(true);
    client
      .list(search)
      .then((data) => !cancelled && setPosts(data))
      .finally(() => !cancelled && setIsLoading(false));
    return () => {
      cancelled = true;
    };
  }, [search, version]);

  const refresh = () => setVersion((v) => v + 1);
  const save = (post: Draft | Post) => {
    void ("id" in post ? client.update(post) : client.create(post)).then(refresh);
  };
  const remove = (id: number) => {
    void client.remove(id).then(refresh);
  };

  return { posts, isLoading, save, remove };
}
"#;

const POSTS_VIEW: &str = r#"
export default function PostsPage() {
  const [search, setSearch] = useState("");
  const [debounced, setDebounced] = useState("");
  const [draft, setDraft] = useState<Draft>({ title: "", content: "" });
  const [editing, setEditing] = useState<Post | null>(null);

  useEffect(() => {
    const handle = setTimeout(() => setDebounced(search), 300);
    return () => clearTimeout(handle);
  }, [search]);

  const { posts, isLoading, save, remove } = usePosts(debounced);

  const submit = (event: React.FormEvent) => {
    event.preventDefault();
    save(editing ? { ...editing, ...draft } : draft);
    setDraft({ title: "", content: "" });
    setEditing(null);
  };

  const edit = (post: Post) => {
    setEditing(post);
    setDraft({ title: post.title, content: post.content ?? "" });
  };

  return (
    <main className="mx-auto max-w-3xl space-y-8 p-8">
      <h1 className="text-3xl font-bold">Posts</h1>

      <input
        value={search}
        onChange={(e) => setSearch(e.target.value)}
        placeholder="Search posts..."
        className="w-full rounded border p-2"
      />

      <form onSubmit={submit} className="space-y-3 rounded-lg border p-4">
        <input
          required
          value={draft.title}
          onChange={(e) => setDraft({ ...draft, title: e.target.value })}
          placeholder="Title"
          className="w-full rounded border p-2"
        />
        <textarea
          value={draft.content}
          onChange={(e) => setDraft({ ...draft, content: e.target.value })}
          placeholder="Content"
          className="w-full rounded border p-2"
        />
        <div className="flex gap-2">
          <button type="submit" className="rounded bg-black px-4 py-2 text-white">
            {editing ? "Update" : "Create"}
          </button>
          {editing && (
            <button type="button" onClick={() => setEditing(null)} className="rounded border px-4 py-2">
              Cancel
            </button>
          )}
        </div>
      </form>

      {isLoading ? (
        <p className="text-neutral-500">Loading...</p>
      ) : posts.length === 0 ? (
        <p className="text-neutral-500">No posts yet.</p>
      ) : (
        <ul className="space-y-3">
          {posts.map((post) => (
            <li key={post.id} className="rounded-lg border p-4">
              <h2 className="font-semibold">{post.title}</h2>
              {post.content && <p className="text-neutral-600">{post.content}</p>}
              <div className="mt-2 flex gap-3 text-sm">
                <button onClick={() => edit(post)} className="text-blue-600">Edit</button>
                <button onClick={() => remove(post.id)} className="text-red-600">Delete</button>
              </div>
            </li>
          ))}
        </ul>
      )}
    </main>
  );
}
"#;

// ── Auth page ────────────────────────────────────────────────────────────────

fn auth_page(provider: AuthProvider) -> &'static str {
    match provider {
        AuthProvider::Clerk => CLERK_PAGE,
        AuthProvider::NextAuth | AuthProvider::None => NEXT_AUTH_PAGE,
    }
}

const NEXT_AUTH_PAGE: &str = r#"import { auth, signIn, signOut } from "@/auth";

export default async function AuthPage() {
  const session = await auth();

  return (
    <main className="mx-auto max-w-md space-y-6 p-8">
      <h1 className="text-3xl font-bold">Authentication</h1>
      {session?.user ? (
        <form
          action={async () => {
            "use server";
            await signOut();
          }}
          className="space-y-3"
        >
          <p>Signed in as {session.user.email}</p>
          <button type="submit" className="rounded bg-black px-4 py-2 text-white">
            Sign out
          </button>
        </form>
      ) : (
        <form
          action={async (formData) => {
            "use server";
            await signIn("credentials", formData);
          }}
          className="space-y-3"
        >
          <input name="email" type="email" placeholder="Email" className="w-full rounded border p-2" />
          <input name="password" type="password" placeholder="Password" className="w-full rounded border p-2" />
          <button type="submit" className="rounded bg-black px-4 py-2 text-white">
            Sign in
          </button>
        </form>
      )}
    </main>
  );
}
"#;

const CLERK_PAGE: &str = r#"import { SignInButton, SignedIn, SignedOut, UserButton } from "@clerk/nextjs";
import { currentUser } from "@clerk/nextjs/server";

export default async function AuthPage() {
  const user = await currentUser();

  return (
    <main className="mx-auto max-w-md space-y-6 p-8">
      <h1 className="text-3xl font-bold">Authentication</h1>
      <SignedOut>
        <SignInButton mode="modal">
          <button className="rounded bg-black px-4 py-2 text-white">Sign in</button>
        </SignInButton>
      </SignedOut>
      <SignedIn>
        <div className="flex items-center gap-3">
          <UserButton />
          <p>Signed in as {user?.primaryEmailAddress?.emailAddress}</p>
        </div>
      </SignedIn>
    </main>
  );
}
"#;

const HUB_PAGE: &str = r#"import Link from "next/link";

export default function Home() {
  return (
    <main className="flex min-h-screen flex-col items-center justify-center gap-12 p-24">
      <div className="max-w-2xl text-center">
        <h1 className="mb-4 text-5xl font-extrabold">Welcome to Your App</h1>
        <p className="text-lg text-neutral-600">Pick an example to get started.</p>
      </div>

      <div className="grid w-full max-w-4xl gap-8 md:grid-cols-2">
        <Link href="/auth" className="rounded-xl border p-8 transition hover:shadow-xl">
          <h2 className="mb-3 text-2xl font-semibold">Authentication &rarr;</h2>
          <p className="text-neutral-600">Sign in and out with server-side sessions.</p>
        </Link>
        <Link href="/posts" className="rounded-xl border p-8 transition hover:shadow-xl">
          <h2 className="mb-3 text-2xl font-semibold">CRUD Operations &rarr;</h2>
          <p className="text-neutral-600">Create, read, update and delete posts through API routes.</p>
        </Link>
      </div>
    </main>
  );
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::test_support::*;
    use nxtgen_core::domain::ExampleSet;

    #[test]
    fn crud_routes_follow_the_orm() {
        let prisma = collection_route(Orm::Prisma);
        assert!(prisma.contains("import prisma from '@/lib/prisma';"));
        assert!(prisma.contains("NextResponse.json(post, { status: 201 })"));

        let drizzle = item_route(Orm::Drizzle);
        assert!(drizzle.contains("import { eq } from 'drizzle-orm';"));
        assert!(drizzle.contains("NextResponse.json(post[0])"));

        let local = collection_route(Orm::None);
        assert!(local.contains("db.post.findMany"));
    }

    #[test]
    fn page_uses_selected_fetch_stack() {
        let plain = posts_page(false, false);
        assert!(plain.starts_with("\"use client\";"));
        assert!(plain.contains("fetch(\"/api/posts\""));
        assert!(!plain.contains("@tanstack/react-query"));

        let rich = posts_page(true, true);
        assert!(rich.contains("import { api } from \"@/lib/axios\";"));
        assert!(rich.contains("useMutation"));
        assert!(!rich.contains("fetch("));
    }

    #[test]
    fn both_examples_replace_home_with_a_hub() {
        let config = ProjectConfig {
            examples: ExampleSet::Both,
            auth: AuthProvider::Clerk,
            ..ProjectConfig::default()
        };
        let fs = generated();
        apply(&Examples, &config, &fs).unwrap();

        assert!(read(&fs, "src/app/auth/page.tsx").contains("@clerk/nextjs/server"));
        assert!(read(&fs, "src/app/posts/page.tsx").contains("PostsPage"));
        assert!(read(&fs, "src/app/page.tsx").contains("href=\"/posts\""));
    }

    #[test]
    fn auth_page_without_provider_is_skipped_with_warning() {
        let config = ProjectConfig {
            examples: ExampleSet::Auth,
            ..ProjectConfig::default()
        };
        let fs = generated();
        let log = apply(&Examples, &config, &fs).unwrap();
        assert!(log.files_written.is_empty());
        assert_eq!(log.warnings.len(), 1);
    }
}
