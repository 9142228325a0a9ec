//! Database access: Prisma, Drizzle, or a JSON-file store for CRUD examples.

use nxtgen_core::{
    application::{Feature, FeatureContext},
    domain::{Orm, ProjectConfig, ScaffoldPlan},
    error::NxtgenResult,
};

pub struct DataLayer;

impl Feature for DataLayer {
    fn name(&self) -> &'static str {
        "data-layer"
    }

    fn description(&self) -> &'static str {
        "Setting up the data layer"
    }

    fn is_enabled(&self, config: &ProjectConfig) -> bool {
        config.orm != Orm::None || config.examples.includes_crud()
    }

    fn register(&self, config: &ProjectConfig, plan: &mut ScaffoldPlan) {
        match config.orm {
            Orm::Prisma => {
                plan.dependencies_mut().add_dep("@prisma/client");
                plan.dependencies_mut().add_dev_dep("prisma");
                plan.add_post_install("Generating Prisma client", ["prisma", "generate"]);
            }
            Orm::Drizzle => {
                plan.dependencies_mut()
                    .add_deps(["drizzle-orm", "@libsql/client"]);
                plan.dependencies_mut().add_dev_dep("drizzle-kit");
                plan.add_post_install("Pushing database schema", ["drizzle-kit", "push"]);
            }
            Orm::None => {}
        }
    }

    fn apply(&self, ctx: &mut FeatureContext<'_>) -> NxtgenResult<()> {
        match ctx.config().orm {
            Orm::Prisma => {
                ctx.write("prisma/schema.prisma", PRISMA_SCHEMA)?;
                ctx.write("src/lib/prisma.ts", PRISMA_CLIENT)?;
                write_env(ctx, "file:./dev.db")
            }
            Orm::Drizzle => {
                ctx.write("drizzle.config.ts", DRIZZLE_CONFIG)?;
                ctx.write("src/db/schema.ts", DRIZZLE_SCHEMA)?;
                ctx.write("src/lib/db.ts", DRIZZLE_CLIENT)?;
                ctx.add_scripts(&[
                    ("db:push", "drizzle-kit push"),
                    ("db:studio", "drizzle-kit studio"),
                ])?;
                write_env(ctx, "file:local.db")
            }
            Orm::None => ctx.write("src/lib/db.ts", LOCAL_DB),
        }
    }
}

/// Local database URL, unless the project already has an `.env`.
fn write_env(ctx: &mut FeatureContext<'_>, url: &str) -> NxtgenResult<()> {
    if ctx.exists(".env") {
        ctx.warn(format!(
            ".env already exists; add DATABASE_URL=\"{url}\" to it by hand"
        ));
        return Ok(());
    }
    ctx.write(".env", &format!("DATABASE_URL=\"{url}\"\n"))
}

const PRISMA_SCHEMA: &str = r#"generator client {
  provider = "prisma-client-js"
}

datasource db {
  provider = "sqlite"
  url      = env("DATABASE_URL")
}

model Post {
  id        Int      @id @default(autoincrement())
  title     String
  content   String?
  createdAt DateTime @default(now())
  updatedAt DateTime @updatedAt
}
"#;

const PRISMA_CLIENT: &str = r#"import { PrismaClient } from "@prisma/client";

const prismaClientSingleton = () => {
  return new PrismaClient();
};

declare global {
  var prisma: undefined | ReturnType<typeof prismaClientSingleton>;
}

const prisma = globalThis.prisma ?? prismaClientSingleton();

export default prisma;

if (process.env.NODE_ENV !== "production") globalThis.prisma = prisma;
"#;

const DRIZZLE_CONFIG: &str = r#"import { defineConfig } from "drizzle-kit";

export default defineConfig({
  schema: "./src/db/schema.ts",
  dialect: "sqlite",
  out: "./drizzle",
  dbCredentials: {
    url: process.env.DATABASE_URL!,
  },
});
"#;

const DRIZZLE_SCHEMA: &str = r#"import { sqliteTable, text, integer } from "drizzle-orm/sqlite-core";
import { sql } from "drizzle-orm";

export const posts = sqliteTable("post", {
  id: integer("id").primaryKey({ autoIncrement: true }),
  title: text("title").notNull(),
  content: text("content"),
  createdAt: text("created_at")
    .default(sql`CURRENT_TIMESTAMP`)
    .notNull(),
  updatedAt: text("updated_at")
    .default(sql`CURRENT_TIMESTAMP`)
    .notNull(),
});

export type Post = typeof posts.$inferSelect;
export type InsertPost = typeof posts.$inferInsert;
"#;

const DRIZZLE_CLIENT: &str = r#"import { drizzle } from "drizzle-orm/libsql";
import { createClient } from "@libsql/client";
import * as schema from "@/db/schema";

const client = createClient({
  url: process.env.DATABASE_URL!,
});

export const db = drizzle(client, { schema });
"#;

const LOCAL_DB: &str = r#"import fs from "fs";
import path from "path";

const DATA_FILE = path.join(process.cwd(), "data.json");

interface Post {
  id: number;
  title: string;
  content: string | null;
  createdAt: string;
  updatedAt: string;
}

interface Data {
  posts: Post[];
}

type Search = { OR?: Array<{ title?: { contains: string }; content?: { contains: string } }> };

function readData(): Data {
  if (!fs.existsSync(DATA_FILE)) {
    return { posts: [] };
  }
  return JSON.parse(fs.readFileSync(DATA_FILE, "utf-8"));
}

function writeData(data: Data) {
  fs.writeFileSync(DATA_FILE, JSON.stringify(data, null, 2));
}

function matches(post: Post, where?: Search) {
  if (!where?.OR) return true;
  return where.OR.some((term) => {
    const title = term.title?.contains.toLowerCase();
    const content = term.content?.contains.toLowerCase();
    return (
      (title !== undefined && post.title.toLowerCase().includes(title)) ||
      (content !== undefined && (post.content ?? "").toLowerCase().includes(content))
    );
  });
}

export const db = {
  post: {
    findMany: async (args?: { where?: Search; orderBy?: { createdAt: "asc" | "desc" } }) => {
      const posts = readData().posts.filter((post) => matches(post, args?.where));
      if (args?.orderBy?.createdAt === "desc") {
        posts.sort((a, b) => b.createdAt.localeCompare(a.createdAt));
      }
      return posts;
    },
    create: async (args: { data: { title: string; content?: string } }) => {
      const data = readData();
      const now = new Date().toISOString();
      const post: Post = {
        id: Date.now(),
        title: args.data.title,
        content: args.data.content ?? null,
        createdAt: now,
        updatedAt: now,
      };
      data.posts.push(post);
      writeData(data);
      return post;
    },
    update: async (args: { where: { id: number }; data: { title?: string; content?: string } }) => {
      const data = readData();
      const index = data.posts.findIndex((p) => p.id === args.where.id);
      if (index === -1) throw new Error("Post not found");
      const post = { ...data.posts[index], ...args.data, updatedAt: new Date().toISOString() };
      data.posts[index] = post;
      writeData(data);
      return post;
    },
    delete: async (args: { where: { id: number } }) => {
      const data = readData();
      const index = data.posts.findIndex((p) => p.id === args.where.id);
      if (index === -1) throw new Error("Post not found");
      const [post] = data.posts.splice(index, 1);
      writeData(data);
      return post;
    },
  },
};
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::test_support::*;
    use nxtgen_core::domain::{ExampleSet, PackageManager};

    fn with_orm(orm: Orm) -> ProjectConfig {
        ProjectConfig {
            orm,
            ..ProjectConfig::default()
        }
    }

    #[test]
    fn prisma_registers_client_cli_and_generate_step() {
        let plan = register(&DataLayer, &with_orm(Orm::Prisma));
        assert_eq!(plan.dependencies().deps(), ["@prisma/client"]);
        assert_eq!(plan.dependencies().dev_deps(), ["prisma"]);
        assert_eq!(
            plan.post_install()[0].command(PackageManager::Npm).to_string(),
            "npx prisma generate"
        );
    }

    #[test]
    fn drizzle_writes_schema_client_and_env() {
        let fs = generated();
        apply(&DataLayer, &with_orm(Orm::Drizzle), &fs).unwrap();
        assert!(read(&fs, "src/db/schema.ts").contains("sqliteTable(\"post\""));
        assert!(read(&fs, "src/lib/db.ts").contains("drizzle(client, { schema })"));
        assert_eq!(read(&fs, ".env"), "DATABASE_URL=\"file:local.db\"\n");
        assert!(read(&fs, "package.json").contains("\"db:push\": \"drizzle-kit push\""));
    }

    #[test]
    fn existing_env_is_left_alone() {
        let fs = generated().with_file(format!("{ROOT}/.env"), "SECRET=1\n");
        let log = apply(&DataLayer, &with_orm(Orm::Prisma), &fs).unwrap();
        assert_eq!(read(&fs, ".env"), "SECRET=1\n");
        assert_eq!(log.warnings.len(), 1);
    }

    #[test]
    fn crud_examples_without_orm_get_a_local_store() {
        let config = ProjectConfig {
            examples: ExampleSet::Crud,
            ..ProjectConfig::default()
        };
        assert!(DataLayer.is_enabled(&config));
        assert!(register(&DataLayer, &config).dependencies().is_empty());

        let fs = generated();
        apply(&DataLayer, &config, &fs).unwrap();
        assert!(read(&fs, "src/lib/db.ts").contains("data.json"));
    }

    #[test]
    fn disabled_without_orm_or_crud() {
        assert!(!DataLayer.is_enabled(&ProjectConfig::default()));
    }
}
