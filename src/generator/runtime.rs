//! Emits `hooks/runtime.ts`, the static helper module every generated hooks module
//! imports from: the `QueryError` union, the `guard` wrapper that tags
//! transport failures as unhandled, relay cursor-page helpers, and `compact`.

const RUNTIME_BODY: &str = r"/**
 * Discriminates failures surfaced through React Query:
 * - `handled`: the service responded with a structured error payload.
 * - `unhandled`: the call itself failed (network, serialization, thrown).
 */
export type QueryError<T> =
  | { kind: 'handled'; payload: T }
  | { kind: 'unhandled'; payload: unknown };

/** Query function context carrying the opaque cursor for infinite queries. */
export interface PageParam {
  pageParam?: string;
}

/** The relay cursor parameters shared by paginated methods. */
export interface RelayParams {
  first?: number;
  after?: string;
  last?: number;
  before?: string;
}

/** Shape of a paginated result page, as far as cursor math is concerned. */
export interface RelayPage {
  pageInfo?: {
    hasNextPage?: boolean;
    hasPreviousPage?: boolean;
    startCursor?: string;
    endCursor?: string;
  };
}

/**
 * Awaits a service call and rethrows any failure as an unhandled
 * `QueryError`, so every error that escapes a generated query or mutation
 * function carries the same discriminated shape.
 */
export async function guard<T>(promise: Promise<T>): Promise<T> {
  try {
    return await promise;
  } catch (error) {
    console.error(error);
    const unhandled: QueryError<never> = { kind: 'unhandled', payload: error };
    throw unhandled;
  }
}

/** Narrows away null/undefined, throwing if the value is absent. */
export function assert<T>(value: T | null | undefined): asserts value is T {
  if (value === null || value === undefined) {
    throw new Error('Expected a value, but received null or undefined');
  }
}

export function getNextPageParam(lastPage: RelayPage): string | undefined {
  return lastPage.pageInfo?.hasNextPage
    ? `after:${lastPage.pageInfo.endCursor}`
    : undefined;
}

export function getPreviousPageParam(firstPage: RelayPage): string | undefined {
  return firstPage.pageInfo?.hasPreviousPage
    ? `before:${firstPage.pageInfo.startCursor}`
    : undefined;
}

/** Derives the initial cursor from explicit relay params, `after` winning. */
export function getInitialPageParam(params: RelayParams): string | undefined {
  if (params.after) {
    return `after:${params.after}`;
  }
  if (params.before) {
    return `before:${params.before}`;
  }
  return undefined;
}

/**
 * Merges an opaque `direction:cursor` page param into the call params.
 * Paging after a cursor drops `last`/`before`; paging before drops
 * `first`/`after`. Cursor values may themselves contain colons.
 */
export function applyPageParam<T extends RelayParams>(
  params: T,
  pageParam: string | undefined,
): T {
  if (!pageParam) {
    return params;
  }
  const separator = pageParam.indexOf(':');
  const direction = pageParam.slice(0, separator);
  const cursor = pageParam.slice(separator + 1);
  const { first, after, last, before, ...rest } = params;
  if (direction === 'after') {
    return { ...rest, first: first ?? last, after: cursor } as T;
  }
  if (direction === 'before') {
    return { ...rest, last: last ?? first, before: cursor } as T;
  }
  return params;
}

/**
 * Drops null/undefined entries from an object, returning `undefined` when
 * nothing remains. Keeps query keys stable regardless of which optional
 * params a caller passed explicitly.
 */
export function compact<T extends Record<string, unknown>>(
  obj: T,
): Partial<T> | undefined {
  const entries = Object.entries(obj).filter(
    ([, value]) => value !== null && value !== undefined,
  );
  if (entries.length === 0) {
    return undefined;
  }
  return Object.fromEntries(entries) as Partial<T>;
}";

/// Render the runtime module with the generated-file header.
pub fn runtime_contents(header: &str) -> String {
    format!("{header}\n\n{RUNTIME_BODY}\n")
}
