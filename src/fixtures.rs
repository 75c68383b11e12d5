//! Shared test inputs.

/// Four DAT entries: a reviewed human protein, its mouse ortholog with an MGI
/// reference, an unreviewed entry without names and an entry with no accession.
pub const SAMPLE_DAT: &str = "\
ID   1433B_HUMAN             Reviewed;         246 AA.
AC   P31946; A8K9K2; E1P616;
DT   23-JAN-2007, integrated into UniProtKB/Swiss-Prot.
DE   RecName: Full=14-3-3 protein beta/alpha;
DE   AltName: Full=Protein 1054;
DE   AltName: Full=Protein kinase C inhibitor protein 1;
DE            Short=KCIP-1;
GN   Name=YWHAB {ECO:0000312|HGNC:HGNC:12849};
GN   Synonyms=KCIP1 {ECO:0000303};
OS   Homo sapiens (Human).
OC   Eukaryota; Metazoa; Chordata; Craniata; Vertebrata; Euteleostomi;
OX   NCBI_TaxID=9606;
CC   -!- FUNCTION: Adapter protein implicated in the regulation of a large
CC       spectrum of both general and specialized signaling pathways.
CC   -!- PATHWAY: Protein modification; protein phosphorylation.
CC   -!- SUBUNIT: Homodimer.
CC   ---------------------------------------------------------------------------
CC   Copyrighted by the UniProt Consortium, see https://www.uniprot.org/terms
DR   EMBL; X57346; CAA40621.1; -; mRNA.
DR   Reactome; R-HSA-111447; Activation of BAD and translocation to mitochondria.
DR   Reactome; R-HSA-5625740; RHO GTPases activate PKNs.
DR   GO; GO:0005737; C:cytoplasm; IDA:UniProtKB.
DR   GO; GO:0019904; F:protein domain specific binding; IPI:UniProtKB.
DR   GO; GO:0006605; P:protein targeting; TAS:ProtInc.
PE   1: Evidence at protein level;
KW   3D-structure; Acetylation; Cytoplasm; Phosphoprotein; Reference proteome.
FT   CHAIN           1..246
SQ   SEQUENCE   246 AA;  28082 MW;  B9A7B4B9BE5B4B47 CRC64;
     MTMDKSELVQ KAKLAEQAER YDDMAAAMKA VTEQGHELSN EERNLLSVAY KNVVGARRSS
//
ID   1433B_MOUSE             Reviewed;         246 AA.
AC   Q9CQV8; O70455;
DE   RecName: Full=14-3-3 protein beta/alpha;
DE   Flags: Fragment;
GN   Name=Ywhab;
OS   Mus musculus (Mouse).
OX   NCBI_TaxID=10090;
DR   MGI; MGI:1891917; Ywhab.
DR   Reactome; R-MMU-111447; Activation of BAD and translocation to mitochondria.
DR   GO; GO:0005737; C:cytoplasm; ISO:MGI.
KW   Acetylation; Cytoplasm; Reference proteome.
//
ID   A0A024R161_HUMAN        Unreviewed;        116 AA.
AC   A0A024R161;
OS   Homo sapiens (Human).
OX   NCBI_TaxID=9606 {ECO:0000313|Proteomes:UP000005640};
KW   Cytoplasm {ECO:0000256|ARBA:ARBA00022490}.
//
ID   BROKEN_HUMAN            Reviewed;          10 AA.
DE   RecName: Full=Broken;
//
";

/// Keyword-list excerpt with a file header, three keywords and one category entry.
pub const SAMPLE_KEYWORDS: &str = "\
-----------------------------------------------------------------------
        UniProt Knowledgebase:
          Keywords list
-----------------------------------------------------------------------
___________________________________________________________________________
ID   3D-structure.
AC   KW-0002
DE   Protein, or part of a protein, whose three-dimensional structure has
DE   been resolved experimentally.
CA   Technical term.
//
ID   Acetylation.
AC   KW-0007
DE   Protein which is posttranslationally modified by the attachment of
DE   at least one acetyl group.
SY   Acetyl.
GO   GO:0006473; protein acetylation
HI   PTM: Acetylation.
CA   PTM.
//
ID   Cytoplasm.
AC   KW-0963
DE   Protein found in the cytoplasm.
GO   GO:0005737; cytoplasm
HI   Cellular component: Cytoplasm.
CA   Cellular component.
//
ID   Phosphoprotein.
AC   KW-0597
DE   Protein which is posttranslationally modified by the attachment of
DE   either a single phosphate group, or of a complex molecule.
SY   Phospho; Phosphorylation.
HI   PTM: Phosphoprotein.
CA   PTM.
//
IC   PTM.
AC   KW-9991
DE   Keywords assigned to proteins because they undergo posttranslational
DE   modification.
WW   https://www.uniprot.org/keywords/KW-9991
//
-----------------------------------------------------------------------
Copyrighted by the UniProt Consortium
-----------------------------------------------------------------------
";
