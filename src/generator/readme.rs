//! Emits the README that ships next to the generated modules: setup, query
//! and mutation usage, error handling, and server-side patterns, with
//! examples drawn from the service's own methods.

use crate::model::{Interface, Method, Service};

use super::classify::is_relay_paginated;
use super::module::ModuleWriter;
use super::names;

/// Representative methods used for the README examples.
struct Examples<'a> {
    query: Option<(&'a Interface, &'a Method)>,
    infinite: Option<(&'a Interface, &'a Method)>,
    mutation: Option<(&'a Interface, &'a Method)>,
}

fn find_examples(service: &Service) -> Examples<'_> {
    let mut examples = Examples {
        query: None,
        infinite: None,
        mutation: None,
    };
    for interface in &service.interfaces {
        for method in &interface.methods {
            let Some((_, binding)) = interface.http_binding(&method.name) else {
                continue;
            };
            if binding.verb.is_get() {
                if examples.query.is_none() {
                    examples.query = Some((interface, method));
                }
                if examples.infinite.is_none() && is_relay_paginated(service, method) {
                    examples.infinite = Some((interface, method));
                }
            } else if examples.mutation.is_none() {
                examples.mutation = Some((interface, method));
            }
        }
    }
    examples
}

fn args_for(method: &Method) -> &'static str {
    if method.parameters.is_empty() { "" } else { "params" }
}

fn hooks_import(interface: &Interface) -> String {
    let path = names::hooks_file_path(&interface.name);
    format!("./{}", path.trim_end_matches(".ts"))
}

pub fn readme_contents(service: &Service, header: &str) -> String {
    let title = &service.title;
    let provider = names::provider_name(title);
    let config_type = names::config_type_name(title);
    let init_fn = names::ambient_init_name(title);
    let examples = find_examples(service);

    let mut w = ModuleWriter::new();
    w.push(format!("# {} React Query hooks", names::pascal(title)));
    w.blank();
    w.push(format!(
        "Generated [TanStack React Query](https://tanstack.com/query) bindings for the {title} client. \
         Every method is exposed as an options factory (`...QueryOptions`, `...MutationOptions`) that can \
         be passed straight to `useQuery`, `useSuspenseQuery`, `useInfiniteQuery`, or `useMutation`."
    ));
    w.blank();

    w.push("## Setup");
    w.blank();
    w.push(format!(
        "Wrap your component tree with the `{provider}` and give it a `fetch` implementation and client options:"
    ));
    w.blank();
    w.push("```tsx");
    w.push(format!("import {{ {provider} }} from './hooks/context';"));
    w.blank();
    w.push(format!("<{provider} fetch={{window.fetch}} options={{{{ root: '/api' }}}}>"));
    w.push("  <App />");
    w.push(format!("</{provider}>"));
    w.push("```");

    if let Some((interface, method)) = examples.query {
        let factory = names::query_options_name(&method.name);
        let args = args_for(method);
        let suspense_hook = names::hook_name(&method.name, true, true, false);
        w.blank();
        w.push("## Queries");
        w.blank();
        w.push("```tsx");
        w.push("import { useQuery } from '@tanstack/react-query';");
        w.push(format!("import {{ {factory} }} from '{}';", hooks_import(interface)));
        w.blank();
        w.push(format!("const {{ data, error }} = useQuery({factory}({args}));"));
        w.push("```");
        w.blank();
        w.push("## Suspense queries");
        w.blank();
        w.push(format!(
            "Pass the same options to `useSuspenseQuery`, or use the generated `{suspense_hook}` wrapper:"
        ));
        w.blank();
        w.push("```tsx");
        w.push("import { useSuspenseQuery } from '@tanstack/react-query';");
        w.blank();
        w.push(format!("const {{ data }} = useSuspenseQuery({factory}({args}));"));
        w.push("```");
    }

    if let Some((interface, method)) = examples.infinite {
        let factory = names::infinite_query_options_name(&method.name);
        let args = args_for(method);
        w.blank();
        w.push("## Infinite queries");
        w.blank();
        w.push(
            "Cursor-paginated methods also get infinite query options. Page boundaries are driven by the \
             relay `pageInfo` cursors; pages are flattened into a single list by the attached `select`."
                .to_string(),
        );
        w.blank();
        w.push("```tsx");
        w.push("import { useInfiniteQuery } from '@tanstack/react-query';");
        w.push(format!("import {{ {factory} }} from '{}';", hooks_import(interface)));
        w.blank();
        w.push(format!(
            "const {{ data, fetchNextPage, hasNextPage }} = useInfiniteQuery({factory}({args}));"
        ));
        w.push("```");
    }

    if let Some((interface, method)) = examples.mutation {
        let factory = names::mutation_options_name(&method.name);
        w.blank();
        w.push("## Mutations");
        w.blank();
        w.push(
            "Mutation options need the `QueryClient` so related queries can be invalidated before the \
             mutation settles:"
                .to_string(),
        );
        w.blank();
        w.push("```tsx");
        w.push("import { useMutation, useQueryClient } from '@tanstack/react-query';");
        w.push(format!("import {{ {factory} }} from '{}';", hooks_import(interface)));
        w.blank();
        w.push("const queryClient = useQueryClient();");
        w.push(format!("const mutation = useMutation({factory}(queryClient));"));
        w.push("```");
    }

    w.blank();
    w.push("## Error handling");
    w.blank();
    w.push(
        "Every failure surfaced through React Query is a `QueryError` discriminated union. Service-reported \
         errors arrive as `{ kind: 'handled', payload }` with the typed error list; transport and runtime \
         failures arrive as `{ kind: 'unhandled', payload }`."
            .to_string(),
    );
    w.blank();
    w.push("```tsx");
    w.push("if (error?.kind === 'handled') {");
    w.push("  showValidationErrors(error.payload);");
    w.push("}");
    w.push("```");

    if let Some(interface) = service.interfaces.first() {
        let getter = names::service_getter_name(&interface.name);
        let hook = names::service_hook_name(&interface.name);
        w.blank();
        w.push("## Using services directly");
        w.blank();
        w.push(format!(
            "`{hook}()` returns the configured client inside the Provider tree. Outside React, call \
             `{getter}(config)` with an explicit `{config_type}`, or `{init_fn}(config)` once and use \
             `{getter}()` thereafter."
        ));
    }

    w.blank();
    w.push("## Server-side rendering");
    w.blank();
    w.push(
        "The options factories take the configuration as a trailing argument, so server code can prefetch \
         without a Provider:"
            .to_string(),
    );
    w.blank();
    w.push("```tsx");
    if let Some((interface, method)) = examples.query {
        let factory = names::query_options_name(&method.name);
        let args = args_for(method);
        let arg_list = if args.is_empty() { "config".to_string() } else { format!("{args}, config") };
        w.push(format!("import {{ {factory} }} from '{}';", hooks_import(interface)));
        w.blank();
        w.push(format!("const config: {config_type} = {{ fetch, options: {{ root: apiRoot }} }};"));
        w.push(format!("await queryClient.prefetchQuery({factory}({arg_list}));"));
    } else {
        w.push(format!("const config: {config_type} = {{ fetch, options: {{ root: apiRoot }} }};"));
    }
    w.push("```");

    w.assemble(header, vec![])
}
