//! React Query, Axios and the Orval client generator.

use nxtgen_core::{
    application::{Feature, FeatureContext},
    domain::{ProjectConfig, ScaffoldPlan},
    error::NxtgenResult,
};

pub(crate) const QUERY_PROVIDER_PATH: &str = "src/components/providers/query-provider.tsx";

pub struct DataFetching;

impl Feature for DataFetching {
    fn name(&self) -> &'static str {
        "data-fetching"
    }

    fn description(&self) -> &'static str {
        "Setting up data fetching"
    }

    fn is_enabled(&self, config: &ProjectConfig) -> bool {
        config.react_query || config.axios || config.orval
    }

    fn register(&self, config: &ProjectConfig, plan: &mut ScaffoldPlan) {
        let deps = plan.dependencies_mut();
        if config.react_query {
            deps.add_dep("@tanstack/react-query");
        }
        if config.axios {
            deps.add_dep("axios");
        }
        if config.orval {
            deps.add_dev_dep("orval");
        }
    }

    fn apply(&self, ctx: &mut FeatureContext<'_>) -> NxtgenResult<()> {
        let config = ctx.config();
        if config.react_query {
            ctx.write(QUERY_PROVIDER_PATH, QUERY_PROVIDER)?;
        }
        if config.axios {
            ctx.write("src/lib/axios.ts", &axios_client(config.orval))?;
        }
        if config.orval {
            ctx.write("orval.config.ts", ORVAL_CONFIG)?;
            ctx.add_scripts(&[("api:generate", "orval")])?;
        }
        Ok(())
    }
}

const QUERY_PROVIDER: &str = r#"'use client';

import { QueryClient, QueryClientProvider } from '@tanstack/react-query';
import { useState } from 'react';

export default function QueryProvider({ children }: { children: React.ReactNode }) {
  const [queryClient] = useState(() => new QueryClient());

  return <QueryClientProvider client={queryClient}>{children}</QueryClientProvider>;
}
"#;

/// With Orval the client also exports the mutator its generated hooks call.
fn axios_client(orval_mutator: bool) -> String {
    let mut client = String::from(
        r#"import axios, { type AxiosRequestConfig } from 'axios';

export const api = axios.create({
  baseURL: '/api',
  headers: {
    'Content-Type': 'application/json',
  },
});
"#,
    );
    if orval_mutator {
        client.push_str(
            r#"
export const backendApi = <T>(config: AxiosRequestConfig): Promise<T> =>
  api.request<T>(config).then(({ data }) => data);
"#,
        );
    }
    client
}

const ORVAL_CONFIG: &str = r#"import { defineConfig } from 'orval';

export default defineConfig({
  api: {
    input: 'http://localhost:3000/api/json',
    output: {
      target: './src/lib/api/generated.ts',
      client: 'react-query',
      mode: 'tags-split',
      prettier: true,
      override: {
        mutator: {
          path: './src/lib/axios.ts',
          name: 'backendApi',
        },
      },
    },
  },
});
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::test_support::*;

    fn all() -> ProjectConfig {
        ProjectConfig {
            react_query: true,
            axios: true,
            orval: true,
            ..ProjectConfig::default()
        }
    }

    #[test]
    fn registers_each_selected_package() {
        let plan = register(&DataFetching, &all());
        assert_eq!(
            plan.dependencies().deps(),
            ["@tanstack/react-query", "axios"]
        );
        assert_eq!(plan.dependencies().dev_deps(), ["orval"]);
    }

    #[test]
    fn orval_adds_mutator_config_and_script() {
        let fs = generated();
        apply(&DataFetching, &all(), &fs).unwrap();

        assert!(read(&fs, "src/lib/axios.ts").contains("export const backendApi"));
        assert!(read(&fs, "orval.config.ts").contains("name: 'backendApi'"));
        assert!(read(&fs, "package.json").contains("\"api:generate\": \"orval\""));
        assert!(read(&fs, QUERY_PROVIDER_PATH).contains("QueryClientProvider"));
    }

    #[test]
    fn plain_axios_has_no_mutator() {
        let config = ProjectConfig {
            axios: true,
            ..ProjectConfig::default()
        };
        let fs = generated();
        apply(&DataFetching, &config, &fs).unwrap();
        assert!(!read(&fs, "src/lib/axios.ts").contains("backendApi"));
        assert!(fs.read_file(format!("{ROOT}/{QUERY_PROVIDER_PATH}")).is_none());
    }
}
